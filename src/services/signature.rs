//! Field-set signing and verification.
//!
//! Outbound forms and inbound notifications share one signature scheme:
//! concatenate the values of every `vads_`-prefixed field in key order,
//! each followed by `+`, append the certificate for the active mode, and
//! SHA-1 the result. Verification is a byte-for-byte recomputation.

use sha1::{Digest, Sha1};

use crate::fields::FieldSet;

/// Which gateway environment requests run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GatewayMode {
    #[default]
    Test,
    Production,
}

impl GatewayMode {
    /// Anything that is not exactly `PRODUCTION` runs against test, so a
    /// misconfigured deployment cannot move real money.
    pub fn coerce(value: &str) -> Self {
        match value {
            "PRODUCTION" => Self::Production,
            _ => Self::Test,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "TEST",
            Self::Production => "PRODUCTION",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignatureService {
    mode: GatewayMode,
    certificate_test: String,
    certificate_prod: String,
}

impl SignatureService {
    pub fn new(
        mode: GatewayMode,
        certificate_test: impl Into<String>,
        certificate_prod: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            certificate_test: certificate_test.into(),
            certificate_prod: certificate_prod.into(),
        }
    }

    pub fn mode(&self) -> GatewayMode {
        self.mode
    }

    /// Certificate for the active mode.
    pub fn certificate(&self) -> &str {
        match self.mode {
            GatewayMode::Test => &self.certificate_test,
            GatewayMode::Production => &self.certificate_prod,
        }
    }

    /// Lowercase hex SHA-1 over the canonical payload.
    pub fn compute(&self, fields: &FieldSet) -> String {
        let mut payload = String::new();
        for value in fields.signed_values() {
            payload.push_str(value);
            payload.push('+');
        }
        payload.push_str(self.certificate());
        hex::encode(Sha1::digest(payload.as_bytes()))
    }

    pub fn verify(&self, signature: &str, fields: &FieldSet) -> bool {
        signature == self.compute(fields)
    }
}
