use estatebook_core_types::RequestId;
use thiserror::Error;

use crate::model::Role;

/// Result type alias using EstateError
pub type Result<T> = std::result::Result<T, EstateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and tests) can match
/// on without depending on message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Identity / reference
    DuplicateEntity,
    DanglingReference,
    NotFound,
    Suggestion,
    Ambiguous,

    // User decisions
    Aborted,

    // Validation
    InvalidInput,

    // Engine
    InvalidTransition,
    InvariantViolation,

    // Ambient
    Config,
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateEntity => "ERR_DUPLICATE_ENTITY",
            ExErrorKind::DanglingReference => "ERR_DANGLING_REFERENCE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Suggestion => "ERR_SUGGESTION",
            ExErrorKind::Ambiguous => "ERR_AMBIGUOUS",
            ExErrorKind::Aborted => "ERR_ABORTED",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTransition => "ERR_INVALID_TRANSITION",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the failure is an expected outcome at the command boundary.
    ///
    /// Recoverable kinds leave the store untouched and are reported to the
    /// user as a message; the rest indicate a bug or a broken environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::DuplicateEntity
                | ExErrorKind::DanglingReference
                | ExErrorKind::NotFound
                | ExErrorKind::Suggestion
                | ExErrorKind::Ambiguous
                | ExErrorKind::Aborted
                | ExErrorKind::InvalidInput
        )
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (a client or listing name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add candidate names (populated for `Suggestion` and `Ambiguous`)
    pub fn with_candidates(mut self, names: Vec<String>) -> Self {
        self.candidates = Some(names);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for client/listing operations
///
/// Display strings double as the user-visible feedback for failed commands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstateError {
    // ===== Identity =====
    #[error("This client already exists: {name}")]
    DuplicateClient { name: String },

    #[error("This listing already exists: {name}")]
    DuplicateListing { name: String },

    #[error("{buyer} is already a buyer of listing {listing}")]
    BuyerAlreadyInListing { listing: String, buyer: String },

    // ===== References =====
    /// A listing names a client that does not exist, or exists with the wrong role
    #[error("Listing {listing} references {client}, who is not an existing {expected}")]
    DanglingReference {
        listing: String,
        client: String,
        expected: Role,
    },

    // ===== Lookup =====
    /// `entity` is "client" or "listing"
    #[error("No {entity} named {name} found")]
    NotFound { entity: &'static str, name: String },

    /// Exact lookup failed but a single near-miss exists
    #[error("Did you mean {suggestion}?")]
    Suggestion { target: String, suggestion: String },

    /// Several entities share the exact name; `candidates` describes each one
    #[error("Several {entity}s are named {name}: {}", .candidates.join(" | "))]
    Ambiguous {
        entity: &'static str,
        name: String,
        candidates: Vec<String>,
    },

    #[error("{buyer} is not a buyer of listing {listing}")]
    BuyerNotInListing { listing: String, buyer: String },

    // ===== User decisions =====
    #[error("Deletion canceled by user.")]
    Aborted { name: String },

    // ===== Validation =====
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A client was submitted under a command for the other role
    #[error("{name} is a {actual}, expected a {expected}")]
    RoleMismatch {
        name: String,
        expected: Role,
        actual: Role,
    },

    // ===== Engine =====
    #[error("Invalid deletion transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Invariant violated: {message}")]
    InvariantViolation { message: String },

    // ===== Ambient =====
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstateError {
    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            EstateError::DuplicateClient { .. }
            | EstateError::DuplicateListing { .. }
            | EstateError::BuyerAlreadyInListing { .. } => ExErrorKind::DuplicateEntity,
            EstateError::DanglingReference { .. } => ExErrorKind::DanglingReference,
            EstateError::NotFound { .. } | EstateError::BuyerNotInListing { .. } => {
                ExErrorKind::NotFound
            }
            EstateError::Suggestion { .. } => ExErrorKind::Suggestion,
            EstateError::Ambiguous { .. } => ExErrorKind::Ambiguous,
            EstateError::Aborted { .. } => ExErrorKind::Aborted,
            EstateError::InvalidField { .. } | EstateError::RoleMismatch { .. } => {
                ExErrorKind::InvalidInput
            }
            EstateError::InvalidTransition { .. } => ExErrorKind::InvalidTransition,
            EstateError::InvariantViolation { .. } => ExErrorKind::InvariantViolation,
            EstateError::Config { .. } => ExErrorKind::Config,
            EstateError::Serialization { .. } => ExErrorKind::Serialization,
            EstateError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from EstateError to the canonical facility
impl From<EstateError> for ExError {
    fn from(err: EstateError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let base = ExError::new(kind).with_message(message);

        match err {
            EstateError::DuplicateClient { name }
            | EstateError::DuplicateListing { name }
            | EstateError::NotFound { name, .. }
            | EstateError::Aborted { name }
            | EstateError::RoleMismatch { name, .. } => base.with_entity_id(name),
            EstateError::BuyerAlreadyInListing { listing, .. }
            | EstateError::BuyerNotInListing { listing, .. }
            | EstateError::DanglingReference { listing, .. } => base.with_entity_id(listing),
            EstateError::Suggestion { target, suggestion } => base
                .with_entity_id(target)
                .with_op("resolve_name")
                .with_candidates(vec![suggestion]),
            EstateError::Ambiguous {
                name, candidates, ..
            } => base
                .with_entity_id(name)
                .with_op("resolve_name")
                .with_candidates(candidates),
            EstateError::InvalidTransition { .. } => base.with_op("delete_client"),
            EstateError::InvalidField { .. }
            | EstateError::InvariantViolation { .. }
            | EstateError::Config { .. }
            | EstateError::Serialization { .. }
            | EstateError::Internal { .. } => base,
        }
    }
}

impl From<serde_json::Error> for EstateError {
    fn from(err: serde_json::Error) -> Self {
        EstateError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let kinds = [
            ExErrorKind::DuplicateEntity,
            ExErrorKind::DanglingReference,
            ExErrorKind::NotFound,
            ExErrorKind::Suggestion,
            ExErrorKind::Ambiguous,
            ExErrorKind::Aborted,
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidTransition,
            ExErrorKind::InvariantViolation,
            ExErrorKind::Config,
            ExErrorKind::Serialization,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_suggestion_carries_candidate() {
        let err = EstateError::Suggestion {
            target: "Tn Wen Xuan".to_string(),
            suggestion: "Tan Wen Xuan".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::Suggestion);
        assert_eq!(ex.candidates(), Some(&["Tan Wen Xuan".to_string()][..]));
        assert_eq!(ex.entity_id(), Some("Tn Wen Xuan"));
    }

    #[test]
    fn test_ambiguity_lists_every_candidate() {
        let err = EstateError::Ambiguous {
            entity: "listing",
            name: "Bishan Condo".to_string(),
            candidates: vec!["Bishan Condo; Price: $1".to_string(), "Bishan Condo; Price: $2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Several listings are named Bishan Condo: Bishan Condo; Price: $1 | Bishan Condo; Price: $2"
        );
        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_AMBIGUOUS");
        assert!(ex.kind().is_recoverable());
        assert_eq!(ex.candidates().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_abort_message_and_kind() {
        let err = EstateError::Aborted {
            name: "Alice".to_string(),
        };
        assert_eq!(err.to_string(), "Deletion canceled by user.");
        assert_eq!(err.kind(), ExErrorKind::Aborted);
        assert!(err.kind().is_recoverable());
    }

    #[test]
    fn test_internal_kinds_not_recoverable() {
        assert!(!ExErrorKind::InvalidTransition.is_recoverable());
        assert!(!ExErrorKind::Internal.is_recoverable());
    }

    #[test]
    fn test_display_includes_code_and_entity() {
        let ex: ExError = EstateError::NotFound {
            entity: "client",
            name: "Bob".to_string(),
        }
        .into();
        let shown = ex.to_string();
        assert!(shown.starts_with("[ERR_NOT_FOUND]"));
        assert!(shown.contains("(entity: Bob)"));
    }
}
