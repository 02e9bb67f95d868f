use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub number: f64,
}

impl Cycle {
    /// Cycles are often unnamed; fall back to the cycle number.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}", self.number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomView {
    pub id: String,
    pub name: String,
    /// Model the view filters, e.g. `Issue` or `Project`.
    pub model_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub active_cycle: Option<Cycle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_cycle_displays_number() {
        let cycle: Cycle = serde_json::from_str(r#"{"id":"c1","name":null,"number":14}"#).unwrap();
        assert_eq!(cycle.display_name(), "14");
    }

    #[test]
    fn named_cycle_displays_name() {
        let cycle = Cycle {
            id: "c2".into(),
            name: Some("Sprint 9".into()),
            number: 9.0,
        };
        assert_eq!(cycle.display_name(), "Sprint 9");
    }
}
