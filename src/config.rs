use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const DEFAULT_PUBLIC_PREFIX: &str = "/uploads";

/// Brand text printed on every document.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandConfig {
    /// Wordmark printed at the top of certificates and invoices
    pub name: String,
    /// Sub-label printed beneath the wordmark
    pub tagline: String,
    /// Base URL the certificate identifier is appended to in the footer
    pub verify_url: String,
    /// Contact address printed in the invoice footer
    pub billing_contact: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "CODEMAKERS".to_string(),
            tagline: "ACADEMY".to_string(),
            verify_url: "https://codemakers.academy/verify/".to_string(),
            billing_contact: "billing@codemakers.academy".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocgenConfig {
    /// Filesystem root under which `certificates/` and `invoices/` live
    pub uploads_dir: PathBuf,
    /// Public URL prefix of `uploads_dir`, used for returned paths
    pub public_prefix: String,
    pub brand: BrandConfig,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
            brand: BrandConfig::default(),
        }
    }
}

impl DocgenConfig {
    /// Load configuration from the environment (and `.env` if present).
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let brand = BrandConfig {
            name: env_or("DOCGEN_BRAND_NAME", defaults.brand.name),
            tagline: env_or("DOCGEN_BRAND_TAGLINE", defaults.brand.tagline),
            verify_url: env_or("DOCGEN_VERIFY_URL", defaults.brand.verify_url),
            billing_contact: env_or("DOCGEN_BILLING_CONTACT", defaults.brand.billing_contact),
        };

        let uploads_dir = env::var("DOCGEN_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.uploads_dir);

        Self {
            uploads_dir,
            public_prefix: env_or("DOCGEN_PUBLIC_PREFIX", defaults.public_prefix),
            brand,
        }
    }

    /// Default configuration writing under `dir`.
    pub fn with_uploads_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            uploads_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            log::debug!("{} not set, using default", key);
            default
        }
    }
}
