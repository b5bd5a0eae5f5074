use regenflag_common::{
    CallerId, CommandSender, FlagCommandError, Location, ResolvedArea, eq_ignore_case,
};

use crate::selection::SelectionTool;

/// Keyword selecting the caller's selection-tool region.
pub const SELECTION_KEYWORD: &str = "selection";

/// Turns flag command arguments into the cells they refer to.
///
/// Supported forms, with `args` excluding the subcommand:
/// - `[]`: the chunk the caller stands in (interactive only)
/// - `[world] <x> <z>`: one chunk by chunk coordinates; the world may only be
///   omitted by interactive callers
/// - `selection`: every chunk touched by the caller's selection (interactive only)
pub struct AreaResolver<'a> {
    selection_tool: Option<&'a dyn SelectionTool>,
}

impl<'a> AreaResolver<'a> {
    pub fn new(selection_tool: Option<&'a dyn SelectionTool>) -> Self {
        Self { selection_tool }
    }

    /// Resolve `args` for `sender`.
    ///
    /// On failure the explanation has already been sent to `sender`.
    pub fn resolve(
        &self,
        sender: &dyn CommandSender,
        args: &[&str],
    ) -> Result<ResolvedArea, FlagCommandError> {
        let _span = tracing::debug_span!("resolve_area", caller = sender.name()).entered();
        let result = self.resolve_area(sender, args);
        match &result {
            Ok(area) => tracing::debug!(world = area.world(), cells = area.len(), "resolved area"),
            Err(err) => {
                tracing::debug!(%err, "area resolution failed");
                err.send_to(sender);
            }
        }
        result
    }

    fn resolve_area(
        &self,
        sender: &dyn CommandSender,
        args: &[&str],
    ) -> Result<ResolvedArea, FlagCommandError> {
        let location = sender.location();
        if location.is_none() && args.len() < 2 {
            return Err(FlagCommandError::ConsoleUsage);
        }

        if args.len() > 3 {
            return Err(FlagCommandError::TooManyArguments);
        }
        if args.len() >= 2 {
            return explicit_cell(location.as_ref(), args);
        }

        let Some(location) = location else {
            return Err(FlagCommandError::ConsoleUsage);
        };
        match args {
            [] => Ok(current_cell(&location)),
            [arg] if eq_ignore_case(arg, SELECTION_KEYWORD) => self.selected_cells(sender.id()),
            [arg] => Err(FlagCommandError::UnknownArgument((*arg).to_owned())),
            _ => Err(FlagCommandError::TooManyArguments),
        }
    }

    fn selected_cells(&self, caller: CallerId) -> Result<ResolvedArea, FlagCommandError> {
        let tool = self
            .selection_tool
            .filter(|tool| tool.is_active())
            .ok_or(FlagCommandError::SelectionToolUnavailable)?;
        let session = tool.session(caller).ok_or(FlagCommandError::NoSelection)?;
        let world = session
            .selection_world()
            .ok_or(FlagCommandError::NoSelection)?;

        let cuboid = match session.selection(&world) {
            Ok(Some(cuboid)) => cuboid,
            Ok(None) => return Err(FlagCommandError::NoSelection),
            Err(err) => {
                // Reported to the caller as an absent selection.
                tracing::debug!(%err, "selection retrieval failed");
                return Err(FlagCommandError::NoSelection);
            }
        };

        let mut area = ResolvedArea::new(world);
        for (x, z) in cuboid.cell_rect().cells() {
            area.push(x, z);
        }
        Ok(area)
    }
}

/// `[world] <x> <z>` with chunk coordinates taken as given.
fn explicit_cell(
    location: Option<&Location>,
    args: &[&str],
) -> Result<ResolvedArea, FlagCommandError> {
    let world = match (args, location) {
        ([world, _, _], _) => (*world).to_owned(),
        (_, Some(location)) => location.world.clone(),
        (_, None) => return Err(FlagCommandError::UnresolvedWorld),
    };

    let [.., x, z] = args else {
        return Err(FlagCommandError::InvalidCoordinates);
    };
    let x = x
        .parse::<i32>()
        .map_err(|_| FlagCommandError::InvalidCoordinates)?;
    let z = z
        .parse::<i32>()
        .map_err(|_| FlagCommandError::InvalidCoordinates)?;
    Ok(ResolvedArea::single(world, x, z))
}

fn current_cell(location: &Location) -> ResolvedArea {
    let block = location.block_pos();
    ResolvedArea::single(location.world.clone(), block.cell_x(), block.cell_z())
}
