use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown region `{input}` (expected england, scotland, or wales)")]
    UnknownRegion { input: String },
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::domain::region::Region;
    use crate::errors::DomainError;

    #[test]
    fn unknown_region_keeps_the_offending_input() {
        let error = Region::from_str("narnia").unwrap_err();

        assert_eq!(error, DomainError::UnknownRegion { input: "narnia".to_owned() });
        assert_eq!(
            error.to_string(),
            "unknown region `narnia` (expected england, scotland, or wales)"
        );
    }
}
