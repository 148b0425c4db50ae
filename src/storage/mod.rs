pub mod config;
pub mod tasks;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// 获取 ~/.task-manager/ 目录路径（无法确定 home 目录时返回 None）
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".task-manager"))
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 序列化为 4 空格缩进的 JSON 文本
pub fn to_json_pretty<T: Serialize>(data: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    // serde_json 只输出合法 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 将数据序列化后保存到 JSON 文件（覆盖原内容）
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let content =
        to_json_pretty(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        values: Vec<u32>,
    }

    #[test]
    fn test_to_json_pretty_uses_four_spaces() {
        let sample = Sample {
            name: "a",
            values: vec![1],
        };
        let json = to_json_pretty(&sample).unwrap();
        assert_eq!(
            json,
            "{\n    \"name\": \"a\",\n    \"values\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_save_json_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");
        save_json(&path, &vec![1, 2]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('['));
    }
}
