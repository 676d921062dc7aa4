#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

/// 只含 server/start.jar 等檔案的假 Solr 發行版
pub fn solr_zip(top_level: &str) -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in [
        ("server/start.jar", "jar"),
        ("server/resources/log4j.properties", "log4j.rootLogger=INFO"),
        ("bin/solr", "#!/bin/sh"),
    ] {
        zip.start_file(format!("{}/{}", top_level, name), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn write_archive(dir: &Path, version: &str) -> PathBuf {
    let archive = dir.join(format!("solr-{}.zip", version));
    std::fs::write(&archive, solr_zip(&format!("solr-{}", version))).unwrap();
    archive
}

/// 拿一個目前沒人用的埠
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// 寫一個假的 java 執行檔，內容是給定的 shell 指令
#[cfg(unix)]
pub fn fake_java(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-java");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();
    path
}
