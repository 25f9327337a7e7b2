use std::fmt;

/// Pipeline position of a BB84 session.
///
/// A session moves through these in declaration order and never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Init,
    Transmitted,
    Measured,
    Sifted,
    Analyzed,
    Reported,
}

impl Stage {
    /// The stage following this one, `None` once reported.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Init => Some(Stage::Transmitted),
            Stage::Transmitted => Some(Stage::Measured),
            Stage::Measured => Some(Stage::Sifted),
            Stage::Sifted => Some(Stage::Analyzed),
            Stage::Analyzed => Some(Stage::Reported),
            Stage::Reported => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "INIT",
            Stage::Transmitted => "TRANSMITTED",
            Stage::Measured => "MEASURED",
            Stage::Sifted => "SIFTED",
            Stage::Analyzed => "ANALYZED",
            Stage::Reported => "REPORTED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_advance_in_order() {
        let mut stage = Stage::Init;
        let mut visited = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            stage = next;
            visited.push(stage);
        }
        assert_eq!(visited.len(), 6);
        assert_eq!(stage, Stage::Reported);
    }

    #[test]
    fn test_display_is_upper_case() {
        assert_eq!(Stage::Sifted.to_string(), "SIFTED");
        assert_eq!(Stage::Reported.to_string(), "REPORTED");
    }
}
