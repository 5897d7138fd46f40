//! Request field normalization for the share endpoints.

use snipshare_core::AppError;

/// Convert the wire `expires_in_days` into the registry's TTL.
///
/// Absent means "never expires". Zero and negative values are rejected rather
/// than treated as absent.
///
/// # Errors
/// Returns [`AppError::Validation`] when the value is below 1 or does not fit
/// the registry's day count.
pub(super) fn ttl_days_for_publish(expires_in_days: Option<i64>) -> Result<Option<u32>, AppError> {
    let Some(days) = expires_in_days else {
        return Ok(None);
    };
    if days < 1 {
        return Err(AppError::Validation(
            "expires_in_days must be at least 1".to_string(),
        ));
    }
    u32::try_from(days)
        .map(Some)
        .map_err(|_| AppError::Validation("expires_in_days is too large".to_string()))
}

/// Treat empty or whitespace-only optional text as absent.
pub(super) fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_days_accepts_absent_and_positive_values() {
        assert_eq!(ttl_days_for_publish(None).unwrap(), None);
        assert_eq!(ttl_days_for_publish(Some(1)).unwrap(), Some(1));
        assert_eq!(ttl_days_for_publish(Some(30)).unwrap(), Some(30));
    }

    #[test]
    fn ttl_days_rejects_zero_negative_and_oversized_values() {
        for days in [0, -1, i64::MIN, i64::from(u32::MAX) + 1] {
            assert!(
                matches!(ttl_days_for_publish(Some(days)), Err(AppError::Validation(_))),
                "accepted {}",
                days
            );
        }
    }

    #[test]
    fn blank_optional_text_is_absent() {
        assert_eq!(normalize_optional_text(Some("  ".to_string())), None);
        assert_eq!(
            normalize_optional_text(Some(" rust ".to_string())),
            Some("rust".to_string())
        );
        assert_eq!(normalize_optional_text(None), None);
    }
}
