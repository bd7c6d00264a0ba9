use std::fmt;

/// A single predicate value: no filter, or exactly this.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<V> {
    #[default]
    Any,
    Only(V),
}

impl<V> Selection<V> {
    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }

    pub fn as_only(&self) -> Option<&V> {
        match self {
            Selection::Any => None,
            Selection::Only(v) => Some(v),
        }
    }

    /// `Any` passes everything; `Only` hands the value to `matches`.
    pub fn admits(&self, matches: impl FnOnce(&V) -> bool) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(v) => matches(v),
        }
    }

    /// Steps through `Any`, then each option in order, then back to `Any`.
    pub fn cycle(&self, options: &[V]) -> Selection<V>
    where
        V: Clone + PartialEq,
    {
        let next = match self {
            Selection::Any => 0,
            Selection::Only(v) => match options.iter().position(|o| o == v) {
                Some(i) => i + 1,
                None => 0,
            },
        };
        options
            .get(next)
            .cloned()
            .map(Selection::Only)
            .unwrap_or(Selection::Any)
    }
}

impl Selection<String> {
    /// Maps UI text onto a predicate; `""` and `"all"` both mean no filter.
    pub fn from_input(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Selection::Any
        } else {
            Selection::Only(raw.to_string())
        }
    }
}

impl<V: fmt::Display> fmt::Display for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Any => f.write_str("all"),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

/// Yes/no predicate over a boolean field.
pub type Flag = Selection<bool>;

impl Flag {
    pub fn cycle_flag(&self) -> Flag {
        self.cycle(&[true, false])
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::Any => "all",
            Selection::Only(true) => "yes",
            Selection::Only(false) => "no",
        }
    }
}

/// Case-insensitive substring test. An empty needle matches anything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_inputs_mean_no_filter() {
        assert_eq!(Selection::from_input(""), Selection::Any);
        assert_eq!(Selection::from_input(" ALL "), Selection::Any);
        assert_eq!(
            Selection::from_input("Finance"),
            Selection::Only("Finance".to_string())
        );
    }

    #[test]
    fn cycle_wraps_back_to_any() {
        let opts = vec!["a".to_string(), "b".to_string()];
        let s = Selection::Any.cycle(&opts);
        assert_eq!(s, Selection::Only("a".to_string()));
        let s = s.cycle(&opts);
        assert_eq!(s, Selection::Only("b".to_string()));
        assert_eq!(s.cycle(&opts), Selection::Any);
        // a value that vanished from the options restarts at the first one
        assert_eq!(
            Selection::Only("z".to_string()).cycle(&opts),
            Selection::Only("a".to_string())
        );
    }

    #[test]
    fn flag_cycles_yes_no_all() {
        let f = Flag::Any.cycle_flag();
        assert_eq!(f.label(), "yes");
        let f = f.cycle_flag();
        assert_eq!(f.label(), "no");
        assert_eq!(f.cycle_flag(), Flag::Any);
    }
}
