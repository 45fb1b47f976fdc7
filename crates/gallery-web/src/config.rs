use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one sub-directory per gallery.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_max_upload_size_mb")]
    pub max_upload_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResizeConfig {
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Largest accepted width or height in a `{w}x{h}` request.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3030))
}

fn default_root() -> PathBuf {
    PathBuf::from("gallery")
}

fn default_max_upload_size_mb() -> usize { 100 }
fn default_jpeg_quality() -> u8 { gallery_core::resize::DEFAULT_JPEG_QUALITY }
fn default_max_dimension() -> u32 { 10_000 }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_upload_size_mb: default_max_upload_size_mb(),
        }
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            max_dimension: default_max_dimension(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            store: StoreConfig::default(),
            resize: ResizeConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Request body cap in bytes, derived from `max_upload_size_mb`.
    pub fn max_upload_bytes(&self) -> usize {
        self.store.max_upload_size_mb.saturating_mul(1024 * 1024)
    }

    /// Loads the TOML file named by `GALLERY_WEB_CONFIG` (defaults otherwise),
    /// then applies `GALLERY_*` environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match std::env::var("GALLERY_WEB_CONFIG").map(PathBuf::from) {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path)?;
                toml::from_str(&contents)?
            }
            Err(_) => ServerConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(addr) = var("GALLERY_BIND_ADDR") {
            self.bind_addr = addr.parse()?;
        }

        if let Some(root) = var("GALLERY_ROOT") {
            self.store.root = PathBuf::from(root);
        }

        if let Some(val) = var("GALLERY_MAX_UPLOAD_SIZE_MB") {
            match val.parse::<usize>() {
                Ok(mb) => self.store.max_upload_size_mb = mb,
                Err(_) => tracing::warn!("Ignoring invalid GALLERY_MAX_UPLOAD_SIZE_MB={val}"),
            }
        }

        if let Some(val) = var("GALLERY_JPEG_QUALITY") {
            match val.parse::<u8>() {
                Ok(q) => self.resize.jpeg_quality = q,
                Err(_) => tracing::warn!("Ignoring invalid GALLERY_JPEG_QUALITY={val}"),
            }
        }

        if let Some(val) = var("GALLERY_MAX_DIMENSION") {
            match val.parse::<u32>() {
                Ok(max) => self.resize.max_dimension = max,
                Err(_) => tracing::warn!("Ignoring invalid GALLERY_MAX_DIMENSION={val}"),
            }
        }

        if let Some(cert) = var("GALLERY_TLS_CERT") {
            self.tls.cert_path = Some(cert);
        }
        if let Some(key) = var("GALLERY_TLS_KEY") {
            self.tls.key_path = Some(key);
        }

        if !(1..=100).contains(&self.resize.jpeg_quality) {
            tracing::warn!(
                "JPEG quality {} is outside 1..=100 and will be clamped",
                self.resize.jpeg_quality
            );
        }

        Ok(())
    }
}
