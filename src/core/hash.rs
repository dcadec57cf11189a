use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Id for feed events that carry neither an id nor a title.
pub fn fallback_event_id(date: &str, lat: f64, lon: f64) -> String {
    let payload = format!("{}|{:.4}|{:.4}", date, lat, lon);
    let digest = sha256_hex(payload.as_bytes());
    format!("evt_{}", &digest[..16])
}

pub fn git_hash() -> String {
    std::env::var("GITHUB_SHA")
        .or_else(|_| std::env::var("GIT_HASH"))
        .unwrap_or_else(|_| "unknown".to_string())
}

pub fn hash_file(path: &std::path::Path) -> anyhow::Result<String> {
    let data = std::fs::read(path)?;
    Ok(sha256_hex(&data))
}
