use regenflag_common::{
    CommandSender, FlagCommandError, FlagIntent, FlagKind, ResolvedArea, eq_ignore_case,
};
use regenflag_config::EnabledWorlds;
use serde::Serialize;

use crate::flagger::Flagger;

const SUCCESS_MESSAGE: &str = "Edited flags successfully!";

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagReport {
    /// World name in its configured casing.
    pub world: String,
    pub intent: FlagIntent,
    pub cells: usize,
}

/// Applies a flag or unflag to every chunk of a resolved area.
pub struct Dispatcher<'a> {
    worlds: &'a dyn EnabledWorlds,
    flagger: &'a dyn Flagger,
}

impl<'a> Dispatcher<'a> {
    pub fn new(worlds: &'a dyn EnabledWorlds, flagger: &'a dyn Flagger) -> Self {
        Self { worlds, flagger }
    }

    /// Flag or unflag each chunk of `area`, then acknowledge to `sender`.
    ///
    /// On failure the explanation has already been sent to `sender` and the
    /// store has not been touched.
    pub fn apply(
        &self,
        sender: &dyn CommandSender,
        area: &ResolvedArea,
        intent: FlagIntent,
    ) -> Result<FlagReport, FlagCommandError> {
        match self.apply_area(area, intent) {
            Ok(report) => {
                tracing::info!(
                    caller = sender.name(),
                    world = %report.world,
                    %intent,
                    cells = report.cells,
                    "edited flags"
                );
                sender.send_message(SUCCESS_MESSAGE);
                Ok(report)
            }
            Err(err) => {
                err.send_to(sender);
                Err(err)
            }
        }
    }

    /// The configured spelling of `world`, matched case-insensitively.
    pub fn governed_world(&self, world: &str) -> Option<&'a str> {
        self.worlds
            .enabled_worlds()
            .iter()
            .find(|enabled| eq_ignore_case(enabled, world))
            .map(String::as_str)
    }

    fn apply_area(
        &self,
        area: &ResolvedArea,
        intent: FlagIntent,
    ) -> Result<FlagReport, FlagCommandError> {
        if area.is_empty() {
            return Err(FlagCommandError::NoCells);
        }

        let Some(world) = self.governed_world(area.world()) else {
            tracing::warn!(world = area.world(), "world is not enabled for regeneration");
            return Err(FlagCommandError::WorldNotEnabled(area.world().to_owned()));
        };

        for cell in area {
            match intent {
                FlagIntent::Flag => {
                    self.flagger
                        .flag_cells_in_radius(world, cell.x(), cell.z(), 0, FlagKind::Eternal)
                }
                FlagIntent::Unflag => self.flagger.unflag_cell(world, cell.x(), cell.z()),
            }
        }

        Ok(FlagReport {
            world: world.to_owned(),
            intent,
            cells: area.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flagger::MockFlagger;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use regenflag_common::test_support::RecordingSender;

    fn worlds() -> Vec<String> {
        vec!["World".to_string(), "world_nether".to_string()]
    }

    fn area(world: &str, cells: &[(i32, i32)]) -> ResolvedArea {
        let mut area = ResolvedArea::new(world);
        for &(x, z) in cells {
            area.push(x, z);
        }
        area
    }

    #[test]
    fn flag_uses_radius_zero_and_eternal_once_per_cell() {
        let worlds = worlds();
        let mut flagger = MockFlagger::new();
        let mut seq = Sequence::new();
        for (x, z) in [(0, 0), (0, 1), (1, 0)] {
            flagger
                .expect_flag_cells_in_radius()
                .with(eq("World"), eq(x), eq(z), eq(0), eq(FlagKind::Eternal))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        flagger.expect_unflag_cell().never();

        let sender = RecordingSender::console();
        let report = Dispatcher::new(&worlds, &flagger)
            .apply(&sender, &area("World", &[(0, 0), (0, 1), (1, 0)]), FlagIntent::Flag)
            .unwrap();

        assert_eq!(report.cells, 3);
        assert_eq!(sender.messages(), vec![SUCCESS_MESSAGE.to_string()]);
    }

    #[test]
    fn unflag_clears_each_cell_once() {
        let worlds = worlds();
        let mut flagger = MockFlagger::new();
        flagger
            .expect_unflag_cell()
            .with(eq("world_nether"), eq(-4), eq(9))
            .times(1)
            .return_const(());
        flagger
            .expect_unflag_cell()
            .with(eq("world_nether"), eq(-3), eq(9))
            .times(1)
            .return_const(());
        flagger.expect_flag_cells_in_radius().never();

        let sender = RecordingSender::console();
        let report = Dispatcher::new(&worlds, &flagger)
            .apply(&sender, &area("world_nether", &[(-4, 9), (-3, 9)]), FlagIntent::Unflag)
            .unwrap();
        assert_eq!(report.intent, FlagIntent::Unflag);
    }

    #[test]
    fn world_name_is_canonicalized_to_configured_casing() {
        let worlds = worlds();
        let mut flagger = MockFlagger::new();
        flagger
            .expect_flag_cells_in_radius()
            .with(eq("World"), eq(2), eq(2), eq(0), eq(FlagKind::Eternal))
            .times(1)
            .return_const(());

        let sender = RecordingSender::console();
        let report = Dispatcher::new(&worlds, &flagger)
            .apply(&sender, &ResolvedArea::single("wORLD", 2, 2), FlagIntent::Flag)
            .unwrap();
        assert_eq!(report.world, "World");
    }

    #[test]
    fn ungoverned_world_never_touches_store() {
        let worlds = worlds();
        let mut flagger = MockFlagger::new();
        flagger.expect_flag_cells_in_radius().never();
        flagger.expect_unflag_cell().never();

        for intent in [FlagIntent::Flag, FlagIntent::Unflag] {
            let sender = RecordingSender::console();
            let err = Dispatcher::new(&worlds, &flagger)
                .apply(&sender, &area("Skyblock", &[(0, 0), (5, 5)]), intent)
                .unwrap_err();
            assert_eq!(err, FlagCommandError::WorldNotEnabled("Skyblock".into()));
            assert_eq!(
                sender.messages(),
                vec!["No world \"Skyblock\" is enabled for regeneration.".to_string()]
            );
        }
    }

    #[test]
    fn empty_area_is_reported_before_world_check() {
        let worlds = worlds();
        let mut flagger = MockFlagger::new();
        flagger.expect_flag_cells_in_radius().never();

        let sender = RecordingSender::console();
        let err = Dispatcher::new(&worlds, &flagger)
            .apply(&sender, &ResolvedArea::new("Skyblock"), FlagIntent::Flag)
            .unwrap_err();
        assert_eq!(err, FlagCommandError::NoCells);
        assert_eq!(
            sender.messages(),
            vec!["No chunks selected for (un)flagging!".to_string()]
        );
    }

    #[test]
    fn non_ascii_world_name_is_canonicalized() {
        let worlds = vec!["Wörld".to_string()];
        let mut flagger = MockFlagger::new();
        flagger
            .expect_flag_cells_in_radius()
            .with(eq("Wörld"), eq(0), eq(0), eq(0), eq(FlagKind::Eternal))
            .times(1)
            .return_const(());

        let sender = RecordingSender::console();
        let report = Dispatcher::new(&worlds, &flagger)
            .apply(&sender, &ResolvedArea::single("WÖRLD", 0, 0), FlagIntent::Flag)
            .unwrap();
        assert_eq!(report.world, "Wörld");
        assert_eq!(sender.messages(), vec![SUCCESS_MESSAGE.to_string()]);
    }

    #[test]
    fn governed_world_lookup() {
        let worlds = worlds();
        let flagger = MockFlagger::new();
        let dispatcher = Dispatcher::new(&worlds, &flagger);
        assert_eq!(dispatcher.governed_world("WORLD_NETHER"), Some("world_nether"));
        assert_eq!(dispatcher.governed_world("world_the_end"), None);
    }
}
