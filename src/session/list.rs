use crate::estimate::Estimate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub label: String,
    #[serde(flatten)]
    pub estimate: Estimate,
}

/// Ordered list of accumulated estimates
#[derive(Debug, Clone, Default)]
pub struct EstimateList {
    entries: Vec<Entry>,
}

impl EstimateList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an estimate; a missing or blank label falls back to the expression
    pub fn add(&mut self, label: Option<&str>, estimate: Estimate) -> &Entry {
        let label = match label.map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => estimate.expression.clone(),
        };
        self.entries.push(Entry { label, estimate });
        &self.entries[self.entries.len() - 1]
    }

    /// Remove by 0-based index
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Plain "label: expression = result" lines, suitable for copying
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{}: {} = {}",
                    e.label, e.estimate.expression, e.estimate.result_display
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for EstimateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {} = {}",
                i + 1,
                e.label,
                e.estimate.expression,
                e.estimate.result_display
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(expression: &str, display: &str) -> Estimate {
        Estimate {
            expression: expression.to_string(),
            result_display: display.to_string(),
            raw_value: 0.0,
        }
    }

    #[test]
    fn test_label_defaults_to_expression() {
        let mut list = EstimateList::new();
        list.add(None, estimate("1 + 1", "2"));
        list.add(Some("  "), estimate("2 + 2", "4"));
        list.add(Some("Writes"), estimate("3 + 3", "6"));

        let labels: Vec<&str> = list.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1 + 1", "2 + 2", "Writes"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = EstimateList::new();
        list.add(None, estimate("1", "1"));
        assert!(list.remove(1).is_none());
        assert_eq!(list.remove(0).unwrap().label, "1");
        assert!(list.is_empty());
    }

    #[test]
    fn test_summary_and_display() {
        let mut list = EstimateList::new();
        list.add(Some("Storage"), estimate("30 billion * 500 bytes", "15 TB"));
        list.add(Some("QPS"), estimate("500 million / month", "~193/s"));

        assert_eq!(
            list.summary(),
            "Storage: 30 billion * 500 bytes = 15 TB\nQPS: 500 million / month = ~193/s"
        );
        assert_eq!(
            list.to_string(),
            "1. Storage: 30 billion * 500 bytes = 15 TB\n2. QPS: 500 million / month = ~193/s\n"
        );
    }

    #[test]
    fn test_entry_serializes_flat() {
        let mut list = EstimateList::new();
        list.add(Some("x"), estimate("1", "1"));
        let json = serde_json::to_value(list.iter().next().unwrap()).unwrap();
        assert_eq!(json["label"], "x");
        assert_eq!(json["result_display"], "1");
    }
}
