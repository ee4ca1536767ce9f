//! Interactive location picker for the configuration walk.

use inquire::{InquireError, Select};
use skyfetch_core::{
    error::{Error, Result},
    model::Location,
    provider::SelectLocation,
};

/// Arrow-key menu over the current location list. Esc or Ctrl-C abort
/// the walk between rounds.
pub struct InquireSelector;

impl SelectLocation for InquireSelector {
    fn select(&mut self, options: &[Location]) -> Result<usize> {
        let labels: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, location)| format!("{}. {}", i + 1, location.name))
            .collect();

        match Select::new("Select location:", labels).raw_prompt() {
            Ok(choice) => Ok(choice.index),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Err(Error::Cancelled)
            }
            Err(InquireError::IO(err)) => Err(Error::Io(err)),
            Err(err) => Err(Error::Io(std::io::Error::other(err.to_string()))),
        }
    }
}
