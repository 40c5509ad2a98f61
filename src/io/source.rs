use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, anyhow};

/// Default resource name for choropleth records.
pub const MAP_DATA: &str = "map_data.json";

/// Read-only access to one input resource (feature records or a grid).
pub trait DataSource: Send + Sync {
    fn fetch(&self) -> Result<Arc<[u8]>>;

    /// Human-readable location, for logs and error messages.
    fn describe(&self) -> String;
}

/// Resource on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskSource {
    path: PathBuf,
}

impl DiskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

impl DataSource for DiskSource {
    fn fetch(&self) -> Result<Arc<[u8]>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("[io::source] failed to read {}", self.path.display()))?;
        Ok(Arc::from(bytes))
    }

    fn describe(&self) -> String { self.path.display().to_string() }
}

/// Resource already held in memory, e.g. handed over by a page.
/// `None` contents model a missing resource.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    name: String,
    bytes: Option<Arc<[u8]>>,
}

impl MemSource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { name: name.into(), bytes: Some(bytes.into()) }
    }

    pub fn missing(name: impl Into<String>) -> Self { Self { name: name.into(), bytes: None } }
}

impl DataSource for MemSource {
    fn fetch(&self) -> Result<Arc<[u8]>> {
        self.bytes.clone()
            .ok_or_else(|| anyhow!("[io::source] missing resource: {}", self.name))
    }

    fn describe(&self) -> String { format!("memory:{}", self.name) }
}

/// Resource fetched over HTTP(S) with a blocking client.
#[cfg(feature = "download")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "download")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self { Self { url: url.into() } }
}

#[cfg(feature = "download")]
impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Arc<[u8]>> {
        use std::time::Duration;

        use reqwest::{blocking::Client, redirect::Policy};

        let client = Client::builder()
            .user_agent(concat!("choromap/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::limited(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context("[io::source] failed to build HTTP client")?;

        let bytes = client.get(&self.url).send()
            .with_context(|| format!("[io::source] GET {}", self.url))?
            .error_for_status()
            .with_context(|| format!("[io::source] GET {} returned error status", self.url))?
            .bytes()
            .with_context(|| format!("[io::source] failed to read body of {}", self.url))?;

        Ok(Arc::from(bytes.as_ref()))
    }

    fn describe(&self) -> String { self.url.clone() }
}

#[inline]
fn is_url(location: &str) -> bool { location.starts_with("http://") || location.starts_with("https://") }

/// Pick a source for a command-line location: http(s) URLs go to the network
/// (feature `download`), everything else is a file path.
pub fn open_source(location: &str) -> Result<Box<dyn DataSource>> {
    if is_url(location) {
        #[cfg(feature = "download")]
        return Ok(Box::new(HttpSource::new(location)));
        #[cfg(not(feature = "download"))]
        anyhow::bail!("[io::source] {location} is a URL but this build has no `download` feature");
    }
    Ok(Box::new(DiskSource::new(location)))
}
