//! AWS error mapping

use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AwsProvider;

/// AWS error code mapping (Route 53, IAM and STS share one code namespace here).
/// Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
impl ProviderErrorMapper for AwsProvider {
    fn provider_name(&self) -> &'static str {
        "aws"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // Authentication
            Some(
                "InvalidClientTokenId"
                | "ExpiredToken"
                | "ExpiredTokenException"
                | "SignatureDoesNotMatch"
                | "UnrecognizedClientException"
                | "MissingAuthenticationToken",
            ) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // Authorization
            Some(code) if code.starts_with("AccessDenied") || code == "UnauthorizedOperation" => {
                ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // Route 53 zone conflicts
            Some("HostedZoneAlreadyExists" | "ConflictingDomainExists") => {
                ProviderError::ZoneAlreadyExists {
                    provider,
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                }
            }

            Some("NoSuchHostedZone") => ProviderError::ZoneNotFound {
                provider,
                zone: context
                    .zone_id
                    .or(context.domain)
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // IAM entities
            Some("EntityAlreadyExists") => ProviderError::RoleAlreadyExists {
                provider,
                role_name: context.role_name.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            Some("NoSuchEntity") => ProviderError::RoleNotFound {
                provider,
                role_name: context.role_name.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Throttling
            Some(code)
                if code.starts_with("Throttling")
                    || code == "PriorRequestNotComplete"
                    || code == "TooManyRequestsException" =>
            {
                ProviderError::RateLimited {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // Invalid parameter
            Some(
                code @ ("InvalidInput"
                | "InvalidDomainName"
                | "InvalidChangeBatch"
                | "MalformedPolicyDocument"
                | "ValidationError"),
            ) => {
                let param = match code {
                    "InvalidDomainName" => "domain",
                    "InvalidChangeBatch" => "change_batch",
                    "MalformedPolicyDocument" => "policy_document",
                    _ => "general",
                };
                ProviderError::InvalidParameter {
                    provider,
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            // Quota
            Some("LimitExceeded" | "TooManyHostedZones" | "DelegationSetNotAvailable") => {
                ProviderError::QuotaExceeded {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // Other error fallback
            _ => self.unknown_error(raw),
        }
    }
}

impl AwsProvider {
    /// Map an SDK error into a [`ProviderError`].
    ///
    /// Transport failures are classified before the service code is consulted.
    pub(crate) fn map_sdk_error<E, R>(&self, err: SdkError<E, R>, context: ErrorContext) -> ProviderError
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug,
    {
        let detail = DisplayErrorContext(&err).to_string();
        match &err {
            SdkError::TimeoutError(_) => {
                return ProviderError::Timeout {
                    provider: self.provider_name().to_string(),
                    detail,
                };
            }
            SdkError::DispatchFailure(_) => {
                return ProviderError::NetworkError {
                    provider: self.provider_name().to_string(),
                    detail,
                };
            }
            _ => {}
        }

        let message = err.message().map_or(detail, ToString::to_string);
        let raw = match err.code() {
            Some(code) => RawApiError::with_code(code, message),
            None => RawApiError::new(message),
        };
        self.map_error(raw, context)
    }
}
