//! Helper functions for integration tests

use serde_json::json;

pub fn metrics_json(cpu: f64, memory: f64, disk: f64) -> serde_json::Value {
    json!({
        "timestamp": "2025-11-02T10:15:00Z",
        "cpu_percent": cpu,
        "memory": {
            "percent": memory,
            "total": 16_000_000_000u64,
            "used": 8_000_000_000u64,
            "available": 8_000_000_000u64
        },
        "disk": {
            "percent": disk,
            "total": 512_000_000_000u64,
            "used": 256_000_000_000u64,
            "free": 256_000_000_000u64
        }
    })
}

pub fn agent_metrics_path(subject: &str) -> String {
    format!("/agent/api/{subject}/metrics")
}
