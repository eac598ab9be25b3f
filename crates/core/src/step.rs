//! Test-step definitions

/// One test-step record of a step-definition field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepDefinition {
    /// Step id
    pub id: i64,
    /// What to do
    pub description: String,
    /// What should happen
    pub expected_results: String,
    /// Position of the step within its field
    pub rank: i64,
}

impl StepDefinition {
    /// Convenience constructor
    pub fn new(
        id: i64,
        description: impl Into<String>,
        expected_results: impl Into<String>,
        rank: i64,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            expected_results: expected_results.into(),
            rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_construction() {
        let step = StepDefinition::new(1, "Step1", "Expected1", 1);
        assert_eq!(step.id, 1);
        assert_eq!(step.description, "Step1");
        assert_eq!(step.expected_results, "Expected1");
        assert_eq!(step.rank, 1);
    }
}
