//! Utilities for validating constraints on types.

use validator::{Validate, ValidationErrors};

/// A type that cannot be instatiated without validating the value within.
/// That is, if you have a [`Valid<T>`], `T` is guaranteed to be valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Valid<T> {
    value: T,
}

impl<T> Valid<T> {
    /// Constructs a new validated value.
    pub fn new(value: T) -> Result<Valid<T>, ValidationFailure>
    where
        T: Validate,
    {
        match value.validate() {
            Ok(()) => Ok(Valid { value }),
            Err(e) => Err(ValidationFailure::from(e)),
        }
    }

    /// Returns a reference to the validated value.
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Returns the validated value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// The field-level violations of a failed validation, as one message.
///
/// Fields are listed alphabetically, e.g.
/// `manufacturer: cannot be blank; price: must be no less than 99.`
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    message: String,
}

impl ValidationFailure {
    /// The joined violation message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        let violations: Vec<String> = fields
            .into_iter()
            .map(|(field, errors)| {
                let rules: Vec<String> = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                format!("{field}: {}", rules.join(", "))
            })
            .collect();
        Self {
            message: format!("{}.", violations.join("; ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Valid;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Fields {
        #[validate(length(min = 4, max = 5, message = "must be four or five long"))]
        four_or_five: String,
        #[validate(range(min = 18, max = 20))]
        age: u32,
        #[validate(length(min = 1, message = "cannot be blank"))]
        bio: String,
    }

    #[test]
    pub fn valid_value_succeeds() {
        let value = Valid::new(Fields {
            four_or_five: "1234".to_string(),
            age: 19,
            bio: "hi".to_string(),
        });
        assert!(value.is_ok());
        assert_eq!(19, value.unwrap().inner().age);
    }

    #[test]
    pub fn violations_are_sorted_by_field() {
        let failure = Valid::new(Fields {
            four_or_five: "124".to_string(),
            age: 19,
            bio: String::new(),
        })
        .unwrap_err();
        assert_eq!(
            "bio: cannot be blank; four_or_five: must be four or five long.",
            failure.message()
        );
    }

    #[test]
    pub fn code_is_used_without_message() {
        let failure = Valid::new(Fields {
            four_or_five: "1234".to_string(),
            age: 30,
            bio: "hi".to_string(),
        })
        .unwrap_err();
        assert_eq!("age: range.", failure.to_string());
    }
}
