use crate::sender::CommandSender;
use crate::types::CELL_SIZE;

const CONSOLE_USAGE: &str = "Console usage: /regen (un)flag <world> <chunk X> <chunk Z>";
const COORDINATE_USAGE: &str = "/regen (un)flag [world] <chunk X> <chunk Z>";
const CURRENT_USAGE: &str = "/regen (un)flag - (un)flag current chunk";
const SELECTION_USAGE: &str = "/regen (un)flag selection - (un)flag selected area";

/// Every way a flag or unflag command can stop before acknowledging.
///
/// All variants are terminal for the invocation. The lines returned by
/// [`FlagCommandError::messages`] are what the caller gets to see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagCommandError {
    #[error("console callers must name a world and chunk coordinates")]
    ConsoleUsage,
    #[error("unable to parse world")]
    UnresolvedWorld,
    #[error("chunk coordinates must be integers")]
    InvalidCoordinates,
    #[error("too many arguments")]
    TooManyArguments,
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
    #[error("selection tool is not enabled")]
    SelectionToolUnavailable,
    #[error("no area selected")]
    NoSelection,
    #[error("world `{0}` is not enabled for regeneration")]
    WorldNotEnabled(String),
    #[error("no chunks selected")]
    NoCells,
}

impl FlagCommandError {
    /// Human-readable lines explaining the failure to the caller.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::ConsoleUsage => vec![
                CONSOLE_USAGE.into(),
                format!("Chunk coordinates = regular coordinates / {CELL_SIZE}"),
            ],
            Self::UnresolvedWorld => vec!["Unable to parse world.".into(), COORDINATE_USAGE.into()],
            Self::InvalidCoordinates | Self::TooManyArguments => vec![COORDINATE_USAGE.into()],
            Self::UnknownArgument(_) => vec![
                CURRENT_USAGE.into(),
                COORDINATE_USAGE.into(),
                SELECTION_USAGE.into(),
            ],
            Self::SelectionToolUnavailable => {
                vec!["The selection tool must be enabled to (un)flag a selection!".into()]
            }
            Self::NoSelection => {
                vec!["You must select an area with the selection tool to (un)flag!".into()]
            }
            Self::WorldNotEnabled(world) => {
                vec![format!("No world \"{world}\" is enabled for regeneration.")]
            }
            Self::NoCells => vec!["No chunks selected for (un)flagging!".into()],
        }
    }

    /// Send every message line to the caller.
    pub fn send_to(&self, sender: &dyn CommandSender) {
        for line in self.messages() {
            sender.send_message(&line);
        }
    }

    /// Malformed arguments or a caller that cannot use the requested form.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::ConsoleUsage
                | Self::UnresolvedWorld
                | Self::InvalidCoordinates
                | Self::TooManyArguments
                | Self::UnknownArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_usage_has_hint() {
        let lines = FlagCommandError::ConsoleUsage.messages();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Console usage"));
        assert_eq!(lines[1], "Chunk coordinates = regular coordinates / 16");
    }

    #[test]
    fn unknown_argument_lists_three_forms() {
        let lines = FlagCommandError::UnknownArgument("foo".into()).messages();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("selection"));
    }

    #[test]
    fn world_not_enabled_quotes_name() {
        let lines = FlagCommandError::WorldNotEnabled("Skyblock".into()).messages();
        assert_eq!(lines, vec!["No world \"Skyblock\" is enabled for regeneration.".to_string()]);
    }

    #[test]
    fn usage_classification() {
        assert!(FlagCommandError::InvalidCoordinates.is_usage());
        assert!(FlagCommandError::UnknownArgument("x".into()).is_usage());
        assert!(!FlagCommandError::NoSelection.is_usage());
        assert!(!FlagCommandError::NoCells.is_usage());
    }
}
