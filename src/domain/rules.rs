use super::CellState;

/// Transition rule applied by the in-process next-generation services
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short description
    fn description(&self) -> &'static str;

    /// Apply rule to compute next cell state
    fn evolve(&self, current: CellState, neighbors: u8) -> CellState;
}

/// Conway's Game of Life (B3/S23)
#[derive(Clone, Copy, Debug, Default)]
pub struct ConwayRule;

impl Rule for ConwayRule {
    fn name(&self) -> &'static str {
        "conway"
    }

    fn description(&self) -> &'static str {
        "B3/S23 - Classic"
    }

    fn evolve(&self, current: CellState, neighbors: u8) -> CellState {
        match (current, neighbors) {
            (CellState::Alive, 2 | 3) => CellState::Alive,
            (CellState::Dead, 3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }
}

/// HighLife (B36/S23)
/// Like Conway's Life but cells with 6 neighbors are born
#[derive(Clone, Copy, Debug, Default)]
pub struct HighLifeRule;

impl Rule for HighLifeRule {
    fn name(&self) -> &'static str {
        "highlife"
    }

    fn description(&self) -> &'static str {
        "B36/S23 - Replicators"
    }

    fn evolve(&self, current: CellState, neighbors: u8) -> CellState {
        match (current, neighbors) {
            (CellState::Alive, 2 | 3) => CellState::Alive,
            (CellState::Dead, 3 | 6) => CellState::Alive,
            _ => CellState::Dead,
        }
    }
}

/// Get all available rules
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(ConwayRule), Box::new(HighLifeRule)]
}

/// Look a rule up by its name, ignoring case
pub fn rule_by_name(name: &str) -> Option<Box<dyn Rule>> {
    all_rules()
        .into_iter()
        .find(|rule| rule.name().eq_ignore_ascii_case(name))
}

/// Get default rule (Conway's Life)
pub fn default_rule() -> Box<dyn Rule> {
    Box::new(ConwayRule)
}
