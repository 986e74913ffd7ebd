use serde::Serialize;

/// A tracked utilization quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cpu,
    Ram,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Cpu, Metric::Ram];
    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Metric::ALL`]; stable for the lifetime of the process.
    pub fn index(self) -> usize {
        match self {
            Metric::Cpu => 0,
            Metric::Ram => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Ram => "RAM",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Metric::Cpu => Metric::Ram,
            Metric::Ram => Metric::Cpu,
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ram" | "mem" | "memory" => Metric::Ram,
            _ => Metric::Cpu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position_in_all() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn next_cycles_through_all_variants() {
        assert_eq!(Metric::Cpu.next(), Metric::Ram);
        assert_eq!(Metric::Cpu.next().next(), Metric::Cpu);
    }

    #[test]
    fn config_parsing_is_lenient() {
        assert_eq!(Metric::from_str_config("RAM"), Metric::Ram);
        assert_eq!(Metric::from_str_config("memory"), Metric::Ram);
        assert_eq!(Metric::from_str_config("cpu"), Metric::Cpu);
        assert_eq!(Metric::from_str_config("bogus"), Metric::Cpu);
    }
}
