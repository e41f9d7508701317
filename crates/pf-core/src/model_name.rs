//! Strongly-typed model name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty model name.
    ///
    /// Prevents accidental mixing of model names with column names, metric
    /// names, or other string types. Model names are the identity shared by
    /// an input node and its compiled outcome.
    pub struct ModelName;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_basics() {
        let name = ModelName::new("fct_orders");
        assert_eq!(name.as_str(), "fct_orders");
        assert_eq!(format!("{}", name), "fct_orders");
        assert_eq!(name, "fct_orders");
        assert!(name.starts_with("fct_"));
    }

    #[test]
    fn test_model_name_rejects_empty() {
        assert!(ModelName::try_new("").is_none());
        let result: Result<ModelName, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_name_serde_roundtrip() {
        let name = ModelName::new("stg_customers");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#""stg_customers""#);
        let back: ModelName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_model_name_borrow_lookup() {
        use std::collections::HashMap;
        let mut map: HashMap<ModelName, i32> = HashMap::new();
        map.insert(ModelName::new("dim_users"), 1);
        assert_eq!(map.get("dim_users"), Some(&1));
    }
}
