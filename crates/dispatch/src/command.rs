use regenflag_area::{AreaResolver, SelectionTool};
use regenflag_common::{CommandSender, FlagCommandError, FlagIntent};
use regenflag_config::EnabledWorlds;

use crate::dispatcher::{Dispatcher, FlagReport};
use crate::flagger::Flagger;

/// One `flag` / `unflag` invocation: resolve the area, then dispatch it.
///
/// Collaborators are borrowed for the lifetime of the command; nothing is
/// shared between invocations.
pub struct FlagCommand<'a> {
    resolver: AreaResolver<'a>,
    dispatcher: Dispatcher<'a>,
}

impl<'a> FlagCommand<'a> {
    pub fn new(
        selection_tool: Option<&'a dyn SelectionTool>,
        worlds: &'a dyn EnabledWorlds,
        flagger: &'a dyn Flagger,
    ) -> Self {
        Self {
            resolver: AreaResolver::new(selection_tool),
            dispatcher: Dispatcher::new(worlds, flagger),
        }
    }

    /// Run the command. Every outcome has been reported to `sender` by the
    /// time this returns.
    pub fn handle(
        &self,
        sender: &dyn CommandSender,
        args: &[&str],
        intent: FlagIntent,
    ) -> Result<FlagReport, FlagCommandError> {
        let _span = tracing::info_span!("flag_command", %intent, caller = sender.name()).entered();
        let area = self.resolver.resolve(sender, args)?;
        self.dispatcher.apply(sender, &area, intent)
    }
}
