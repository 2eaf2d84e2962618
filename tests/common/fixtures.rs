//! Static report corpora used across harnesses.
//!
//! The node and job records below are shaped like real `sinfo --json` and
//! `sacct --json` output from Slurm 23.02, with made-up values.

/// One node with every field `sinfo --json` emits.
pub const SINFO_NODE: &str = r#"{
    "architecture": "x86_64",
    "burstbuffer_network_address": "",
    "boards": 1,
    "boot_time": 1679345346,
    "comment": "",
    "cores": 20,
    "cpu_binding": 0,
    "cpu_load": 2000,
    "extra": "",
    "free_memory": 246,
    "cpus": 40,
    "last_busy": 1681387881,
    "features": "x86_64,turing,48gb",
    "active_features": "x86_64,turing,48gb",
    "gres": "gpu:rtx8000:8(S:0-1)",
    "gres_drained": "N\/A",
    "gres_used": "gpu:rtx8000:8(IDX:0-7),tpu:0",
    "mcs_label": "",
    "name": "cn-c001",
    "next_state_after_reboot": "invalid",
    "address": "cn-c001.server.mila.quebec",
    "hostname": "cn-c001",
    "state": "down",
    "state_flags": ["DRAIN"],
    "next_state_after_reboot_flags": [],
    "operating_system": "Linux 4.15.0-194-generic #205-Ubuntu SMP Fri Sep 16 19:49:27 UTC 2022",
    "owner": null,
    "partitions": ["debug"],
    "port": 6812,
    "real_memory": 1800,
    "reason": "Sanity Check Failed",
    "reason_changed_at": 1679695880,
    "reason_set_by_user": "root",
    "slurmd_start_time": 1679345380,
    "sockets": 1,
    "threads": 1,
    "temporary_disk": 0,
    "weight": 1,
    "tres": "cpu=40,mem=386618M,billing=96,gres\/gpu=8",
    "slurmd_version": "23.02.1-ex",
    "alloc_memory": 0,
    "alloc_cpus": 0,
    "idle_cpus": 2,
    "tres_used": "cpu=26,mem=249G,gres\/gpu=8",
    "tres_weighted": 0
}"#;

/// One completed job as `sacct --json` reports it.
pub const SACCT_JOB: &str = r#"{
    "account": "mila",
    "comment": {"administrator": null, "job": null, "system": null},
    "allocation_nodes": 1,
    "array": {"job_id": 0, "limits": {"max": {"running": {"tasks": 0}}}, "task": null, "task_id": null},
    "association": {"account": "mila", "cluster": "mila", "partition": null, "user": "alice"},
    "cluster": "mila",
    "constraints": "",
    "container": null,
    "derived_exit_code": {"status": "SUCCESS", "return_code": 0},
    "time": {
        "elapsed": 3600,
        "eligible": 1681300000,
        "end": 1681303610,
        "start": 1681300010,
        "submission": 1681300000,
        "suspended": 0,
        "system": {"seconds": 1, "microseconds": 0},
        "limit": 7200,
        "total": {"seconds": 3590, "microseconds": 0},
        "user": {"seconds": 3589, "microseconds": 0}
    },
    "exit_code": {"status": "SUCCESS", "return_code": 0},
    "flags": ["CLEAR_SCHEDULING", "STARTED_ON_SUBMIT"],
    "gres_detail": ["gpu:rtx8000:1(IDX:0)"],
    "group": "alice",
    "het": {"job_id": 0, "job_offset": null},
    "job_id": 2745012,
    "name": "train.sh",
    "mcs": {"label": ""},
    "nodes": "cn-c001",
    "partition": "long",
    "priority": 1000,
    "qos": "normal",
    "required": {"CPUs": 4, "memory": 16384},
    "kill_request_user": null,
    "reservation": {"id": 0, "name": 0},
    "state": {"current": "COMPLETED", "reason": "None"},
    "steps": [],
    "submit_line": "sbatch train.sh",
    "tres": {
        "allocated": [
            {"type": "cpu", "name": "", "id": 1, "count": 4},
            {"type": "mem", "name": "", "id": 2, "count": 16384},
            {"type": "node", "name": "", "id": 4, "count": 1},
            {"type": "billing", "name": "", "id": 5, "count": 4},
            {"type": "gres", "name": "gpu", "id": 1001, "count": 1}
        ],
        "requested": [
            {"type": "cpu", "name": "", "id": 1, "count": 4},
            {"type": "mem", "name": "", "id": 2, "count": 16384}
        ]
    },
    "user": "alice",
    "wckey": {"wckey": "", "flags": []},
    "working_directory": "/home/mila/a/alice"
}"#;

/// Wrap raw records in an envelope under `key`.
pub fn report(key: &str, records: &[serde_json::Value]) -> Vec<u8> {
    let mut envelope = serde_json::Map::new();
    envelope.insert(
        "meta".to_string(),
        serde_json::json!({"plugin": {"type": "openapi/v0.0.39"}}),
    );
    envelope.insert(key.to_string(), serde_json::Value::from(records.to_vec()));
    envelope.insert("errors".to_string(), serde_json::json!([]));
    serde_json::to_vec(&envelope).expect("report fixture serializes")
}

/// The full `SINFO_NODE` fixture as a JSON value.
pub fn sinfo_node() -> serde_json::Value {
    serde_json::from_str(SINFO_NODE).expect("SINFO_NODE is valid JSON")
}

/// The full `SACCT_JOB` fixture as a JSON value.
pub fn sacct_job() -> serde_json::Value {
    serde_json::from_str(SACCT_JOB).expect("SACCT_JOB is valid JSON")
}

/// `n` small node records named `cn-0000`, `cn-0001`, …
pub fn node_records(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            serde_json::json!({
                "name": format!("cn-{i:04}"),
                "state": if i % 7 == 0 { "down" } else { "idle" },
                "real_memory": 192_000,
                "cpus": 40,
                "gres": "gpu:a100:4(S:0-1)",
                "tres": "cpu=40,mem=187.50G,billing=40,gres/gpu=4",
                "port": 6818,
            })
        })
        .collect()
}
