use crate::core::ConfigProvider;
use crate::domain::model::{InstallLayout, InstallMarker};
use crate::utils::error::{Result, SolrError};
use chrono::Utc;
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const STAGING_DIR: &str = ".staging";

/// 確保 Solr 發行版已安裝在 install_dir 底下
pub struct DistributionInstaller<'a, C: ConfigProvider> {
    config: &'a C,
    client: &'a Client,
}

impl<'a, C: ConfigProvider> DistributionInstaller<'a, C> {
    pub fn new(config: &'a C, client: &'a Client) -> Self {
        Self { config, client }
    }

    /// 路徑一律轉成絕對路徑，JVM 的工作目錄是 server 目錄
    pub fn layout(&self) -> Result<InstallLayout> {
        let root = std::path::absolute(self.config.install_dir())?;
        let home_dir = self.config.home_dir().map(std::path::absolute).transpose()?;
        Ok(InstallLayout::new(root, self.config.solr_version(), home_dir))
    }

    /// 檢查標記檔與 start.jar 是否都在，且版本一致
    pub fn is_installed(&self, layout: &InstallLayout) -> bool {
        if !layout.start_jar().is_file() {
            return false;
        }

        match read_marker(&layout.marker_path()) {
            Ok(marker) => marker.version == self.config.solr_version(),
            Err(e) => {
                tracing::debug!("No usable install marker: {}", e);
                false
            }
        }
    }

    pub async fn ensure_installed(&self) -> Result<InstallLayout> {
        let layout = self.layout()?;

        if self.is_installed(&layout) {
            tracing::info!(
                "✅ Solr {} already installed at {}",
                self.config.solr_version(),
                layout.dist_dir.display()
            );
            return Ok(layout);
        }

        tracing::info!(
            "📦 Installing Solr {} into {}",
            self.config.solr_version(),
            layout.root.display()
        );
        fs::create_dir_all(&layout.root)?;

        // 沒有有效標記的舊目錄視為安裝中斷，整個移除
        if layout.dist_dir.exists() {
            tracing::warn!(
                "Removing incomplete installation at {}",
                layout.dist_dir.display()
            );
            fs::remove_dir_all(&layout.dist_dir)?;
        }

        let (archive, source, downloaded) = match self.config.archive_path() {
            Some(path) => {
                if !path.is_file() {
                    return Err(SolrError::Install {
                        message: format!("archive {} does not exist", path.display()),
                    });
                }
                (path.to_path_buf(), path.display().to_string(), false)
            }
            None => {
                let url = self.config.distribution_url();
                let target = layout
                    .root
                    .join(format!("solr-{}.zip", self.config.solr_version()));
                self.download(&url, &target).await?;
                (target, url, true)
            }
        };

        let root = layout.root.clone();
        let dist_dir = layout.dist_dir.clone();
        let archive_for_extract = archive.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            extract_distribution(&archive_for_extract, &root, &dist_dir)
        })
        .await
        .map_err(|e| SolrError::Install {
            message: format!("extraction task failed: {}", e),
        })?;

        // 下載來的封存檔不論解壓成功與否都不保留
        if downloaded && !self.config.keep_archive() {
            remove_quietly(&archive);
        }
        extracted?;

        if !layout.start_jar().is_file() {
            return Err(SolrError::Install {
                message: format!(
                    "distribution is missing {}",
                    layout.start_jar().display()
                ),
            });
        }

        let marker = InstallMarker {
            version: self.config.solr_version().to_string(),
            source,
            installed_at: Utc::now(),
        };
        fs::write(layout.marker_path(), serde_json::to_vec_pretty(&marker)?)?;

        tracing::info!("✅ Solr {} installed", marker.version);
        Ok(layout)
    }

    /// 分段下載到檔案，避免整包放進記憶體
    async fn download(&self, url: &str, target: &Path) -> Result<()> {
        tracing::info!("⬇️ Downloading {}", url);

        let mut response = self
            .client
            .get(url)
            .timeout(self.config.download_timeout())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SolrError::Download {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let partial = target.with_extension("zip.part");
        let written = match write_body(&mut response, &partial).await {
            Ok(0) => {
                remove_quietly(&partial);
                return Err(SolrError::Download {
                    url: url.to_string(),
                    message: "empty response body".to_string(),
                });
            }
            Ok(written) => written,
            Err(e) => {
                remove_quietly(&partial);
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, target).await?;
        tracing::debug!("Downloaded {} bytes to {}", written, target.display());
        Ok(())
    }
}

async fn write_body(response: &mut reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

/// 清理失敗時的殘留檔案，清不掉只記錄
fn remove_quietly(path: &Path) {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {}", path.display(), e),
    }
}

fn read_marker(path: &Path) -> Result<InstallMarker> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// 解壓到暫存目錄，再把唯一的頂層目錄搬到 dist_dir
fn extract_distribution(archive: &Path, root: &Path, dist_dir: &Path) -> Result<()> {
    let staging = root.join(STAGING_DIR);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let result = unpack(archive, &staging, dist_dir);
    remove_quietly(&staging);
    result
}

fn unpack(archive: &Path, staging: &Path, dist_dir: &Path) -> Result<()> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    tracing::debug!("Extracting {} entries from {}", zip.len(), archive.display());
    zip.extract(staging)?;

    let top_level = single_top_level_dir(staging)?;
    fs::rename(&top_level, dist_dir)?;
    Ok(())
}

fn single_top_level_dir(staging: &Path) -> Result<PathBuf> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(staging)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }

    match dirs.len() {
        1 => Ok(dirs.remove(0)),
        0 => Err(SolrError::Install {
            message: "archive has no top-level directory".to_string(),
        }),
        n => Err(SolrError::Install {
            message: format!("archive has {} top-level directories, expected one", n),
        }),
    }
}
