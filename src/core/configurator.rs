use crate::domain::model::InstallLayout;
use crate::utils::error::{Result, SolrError};
use std::fs;
use std::path::Path;

/// 單機模式用的 solr.xml，埠號由 -Djetty.port 帶入
const SOLR_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<solr>
  <int name="maxBooleanClauses">${solr.max.booleanClauses:1024}</int>
  <str name="sharedLib">${solr.sharedLib:}</str>

  <shardHandlerFactory name="shardHandlerFactory" class="HttpShardHandlerFactory">
    <int name="socketTimeout">${socketTimeout:600000}</int>
    <int name="connTimeout">${connTimeout:60000}</int>
  </shardHandlerFactory>
</solr>
"#;

const CORE_PROPERTIES: &str = "core.properties";

/// 準備 Solr home：solr.xml、各 collection 的 core 目錄與 log 目錄
pub struct HomeConfigurator<'a> {
    collections_dir: Option<&'a Path>,
}

impl<'a> HomeConfigurator<'a> {
    pub fn new(collections_dir: Option<&'a Path>) -> Self {
        Self { collections_dir }
    }

    pub fn configure(&self, layout: &InstallLayout) -> Result<()> {
        fs::create_dir_all(&layout.home_dir)?;
        fs::create_dir_all(&layout.log_dir)?;

        self.ensure_solr_xml(&layout.home_dir)?;

        if let Some(collections_dir) = self.collections_dir {
            self.install_collections(collections_dir, &layout.home_dir)?;
        }

        Ok(())
    }

    fn ensure_solr_xml(&self, home_dir: &Path) -> Result<()> {
        let path = home_dir.join("solr.xml");

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            if !content.contains("<solr") {
                return Err(SolrError::Config {
                    message: format!("{} has no <solr> root element", path.display()),
                });
            }
            tracing::debug!("Keeping existing {}", path.display());
            return Ok(());
        }

        tracing::info!("📝 Writing {}", path.display());
        fs::write(&path, SOLR_XML)?;
        Ok(())
    }

    fn install_collections(&self, collections_dir: &Path, home_dir: &Path) -> Result<()> {
        if !collections_dir.is_dir() {
            return Err(SolrError::Config {
                message: format!(
                    "collections directory {} does not exist",
                    collections_dir.display()
                ),
            });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(collections_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                entries.push(entry);
            }
        }
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            let source_conf = entry.path().join("conf");
            validate_collection(&name, &source_conf)?;

            let core_dir = home_dir.join(&name);
            // 已存在的 core 連同索引資料都不動
            if core_dir.join(CORE_PROPERTIES).exists() {
                tracing::debug!("Core '{}' already present, skipping", name);
                continue;
            }

            tracing::info!("📚 Adding core '{}'", name);
            copy_dir_recursive(&source_conf, &core_dir.join("conf"))?;
            fs::write(core_dir.join(CORE_PROPERTIES), format!("name={}\n", name))?;
        }

        Ok(())
    }
}

fn validate_collection(name: &str, conf_dir: &Path) -> Result<()> {
    if !conf_dir.join("solrconfig.xml").is_file() {
        return Err(SolrError::Config {
            message: format!("collection '{}' is missing conf/solrconfig.xml", name),
        });
    }

    if !conf_dir.join("schema.xml").is_file() && !conf_dir.join("managed-schema").is_file() {
        return Err(SolrError::Config {
            message: format!(
                "collection '{}' needs conf/schema.xml or conf/managed-schema",
                name
            ),
        });
    }

    Ok(())
}

fn copy_dir_recursive(from: &Path, to: &Path) -> Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
