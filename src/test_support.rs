use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub fn zip_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// 最小的假發行版：只有 Jetty 啟動需要的檔案
pub fn solr_zip(top_level: &str) -> Vec<u8> {
    let start_jar = format!("{}/server/start.jar", top_level);
    let log4j = format!("{}/server/resources/log4j.properties", top_level);
    let script = format!("{}/bin/solr", top_level);
    zip_with_entries(&[
        (start_jar.as_str(), "jar"),
        (log4j.as_str(), "log4j.rootLogger=INFO"),
        (script.as_str(), "#!/bin/sh"),
    ])
}
