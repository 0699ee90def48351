use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, instrument};

pub const DEFAULT_MODEL_URL: &str =
    "https://dl.fbaipublicfiles.com/fasttext/supervised-models/lid.176.bin";
pub const DEFAULT_MODEL_PATH: &str = "models/lid.176.bin";

const USER_AGENT: &str = concat!("lingua-gate/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ModelStoreError {
    #[error("model download failed: {0}")]
    Request(String),

    #[error("model download returned http {status}")]
    Http { status: StatusCode },

    #[error("model file io error: {0}")]
    Io(#[from] std::io::Error),
}

fn build_client() -> Result<Client, ModelStoreError> {
    // no overall timeout: the artifact is several hundred megabytes
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ModelStoreError::Request(e.to_string()))
}

/// Make sure the model artifact exists at `path`, downloading it from `url`
/// when missing. Returns the path of the cached artifact.
#[instrument(skip_all, fields(path = %path.as_ref().display(), url = %url))]
pub async fn ensure_model(path: impl AsRef<Path>, url: &str) -> Result<PathBuf, ModelStoreError> {
    let path = path.as_ref();

    if fs::try_exists(path).await? {
        info!("Model found in cache");
        return Ok(path.to_path_buf());
    }

    info!("Model not found, downloading");
    download(path, url).await?;
    Ok(path.to_path_buf())
}

async fn download(path: &Path, url: &str) -> Result<(), ModelStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    let mut response = build_client()?
        .get(url)
        .send()
        .await
        .map_err(|e| ModelStoreError::Request(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ModelStoreError::Http { status });
    }

    // write next to the target and rename once complete so a partial
    // download never looks like a cached model
    let partial = partial_path(path);
    let mut file = fs::File::create(&partial).await?;
    let mut written: u64 = 0;

    let result = async {
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ModelStoreError::Request(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        file.sync_all().await?;
        Ok::<(), ModelStoreError>(())
    }
    .await;

    if let Err(err) = result {
        drop(file);
        let _ = fs::remove_file(&partial).await;
        return Err(err);
    }

    drop(file);
    fs::rename(&partial, path).await?;
    info!(bytes = written, "Model downloaded successfully");

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
