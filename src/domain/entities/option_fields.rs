use serde::{Deserialize, Deserializer, Serialize};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
///
/// Use together with `#[serde(default)]` so absent fields become `Unchanged`.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Applies the patch to `current`: unchanged keeps it, null clears it.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::SetToNull => None,
            Self::SetToValue(v) => Some(v),
        }
    }
}

impl OptionField<String> {
    pub fn flatten_str(&self) -> Option<&str> {
        self.value_ref().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Patch {
        field: OptionField<String>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"field": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"field": "x"}"#).unwrap();

        assert_eq!(absent.field, OptionField::Unchanged);
        assert_eq!(null.field, OptionField::SetToNull);
        assert_eq!(value.field, OptionField::SetToValue("x".to_string()));
    }

    #[test]
    fn apply_to_follows_patch_semantics() {
        let current = Some("old".to_string());

        assert_eq!(OptionField::Unchanged.apply_to(current.clone()), current);
        assert_eq!(OptionField::<String>::SetToNull.apply_to(current.clone()), None);
        assert_eq!(
            OptionField::SetToValue("new".to_string()).apply_to(current),
            Some("new".to_string())
        );
    }
}
