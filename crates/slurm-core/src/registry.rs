//! Field registries: one static table per report kind.
//!
//! Each table maps every field Slurm is known to emit for that kind of record
//! to a [`Translator`]. A field that is not in the table fails normalisation,
//! so a field added by a Slurm upgrade shows up as an error instead of being
//! dropped without anyone noticing.
//!
//! # Adding a field
//!
//! When Slurm starts emitting a new field, add exactly one entry to the table
//! of its report kind, choosing `Copy`, `Rename`, `Ignore`, `Decode` or
//! `Flatten`. Nothing else needs to change.
//!
//! # Adding a report kind
//!
//! Add a table here and a [`ReportKind`](crate::types::ReportKind) `static`
//! next to [`NODES`](crate::types::NODES) that names it, together with the
//! envelope key and the natural key.

use std::collections::BTreeMap;

use phf::phf_map;

use crate::decode::Grammar;
use crate::translator::Translator::{self, Copy, Decode, Flatten, Ignore, Rename};
use crate::types::ReportKind;

pub type Registry = phf::Map<&'static str, Translator>;

/// Look up the translator for `field` in the registry of `kind`.
pub fn lookup(kind: &ReportKind, field: &str) -> Option<&'static Translator> {
    kind.lookup(field)
}

/// Every canonical key a registry can produce, mapped to the source fields
/// that produce it. A key with more than one source is a registry bug.
pub fn output_keys(registry: &'static Registry) -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut keys: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for (&field, translator) in registry.entries() {
        for key in translator.output_keys(field) {
            keys.entry(key).or_default().push(field);
        }
    }
    keys
}

// ---------------------------------------------------------------------------
// Nodes (`sinfo --json`, Slurm 23.02)
// ---------------------------------------------------------------------------

pub static NODE_FIELDS: Registry = phf_map! {
    "architecture" => Rename("arch"),
    "burstbuffer_network_address" => Ignore,
    "boards" => Ignore,
    "boot_time" => Ignore,
    "comment" => Copy,
    "cores" => Copy,
    "cpu_binding" => Ignore,
    "cpu_load" => Ignore,
    "cpus" => Copy,
    "extra" => Ignore,
    "free_memory" => Ignore,
    "last_busy" => Copy,
    "features" => Copy,
    "active_features" => Ignore,
    "gres" => Decode { key: "gres", grammar: Grammar::ResourceList },
    "gres_drained" => Ignore,
    "gres_used" => Ignore,
    "mcs_label" => Ignore,
    "name" => Copy,
    "next_state_after_reboot" => Ignore,
    "address" => Rename("addr"),
    "hostname" => Ignore,
    "state" => Copy,
    "state_flags" => Ignore,
    "next_state_after_reboot_flags" => Ignore,
    "operating_system" => Ignore,
    "owner" => Ignore,
    "partitions" => Ignore,
    "port" => Ignore,
    "real_memory" => Rename("memory"),
    "reason" => Copy,
    "reason_changed_at" => Copy,
    "reason_set_by_user" => Ignore,
    "slurmd_start_time" => Ignore,
    "sockets" => Ignore,
    "threads" => Ignore,
    "temporary_disk" => Ignore,
    "weight" => Ignore,
    "tres" => Decode { key: "tres", grammar: Grammar::KeyValues },
    "slurmd_version" => Ignore,
    "alloc_memory" => Ignore,
    "alloc_cpus" => Ignore,
    "idle_cpus" => Ignore,
    "tres_used" => Decode { key: "tres_used", grammar: Grammar::KeyValues },
    "tres_weighted" => Ignore,
};

// ---------------------------------------------------------------------------
// Jobs (`sacct --json`, Slurm 23.02)
// ---------------------------------------------------------------------------

pub static JOB_FIELDS: Registry = phf_map! {
    "account" => Copy,
    "comment" => Ignore,
    "allocation_nodes" => Ignore,
    "array" => Flatten(&[
        ("job_id", Rename("array_job_id")),
        ("limits", Ignore),
        ("task", Ignore),
        ("task_id", Rename("array_task_id")),
    ]),
    "association" => Ignore,
    "cluster" => Rename("cluster_name"),
    "constraints" => Ignore,
    "container" => Ignore,
    "derived_exit_code" => Ignore,
    "time" => Flatten(&[
        ("elapsed", Rename("elapsed_time")),
        ("eligible", Ignore),
        ("end", Rename("end_time")),
        ("start", Rename("start_time")),
        ("submission", Rename("submit_time")),
        ("suspended", Ignore),
        ("system", Ignore),
        ("limit", Rename("time_limit")),
        ("total", Ignore),
        ("user", Ignore),
    ]),
    "exit_code" => Flatten(&[
        ("status", Rename("exit_status")),
        ("return_code", Rename("exit_code")),
        ("signal", Ignore),
    ]),
    "flags" => Ignore,
    "gres_detail" => Decode { key: "gres_allocated", grammar: Grammar::ResourceList },
    "group" => Ignore,
    "het" => Ignore,
    "job_id" => Copy,
    "name" => Copy,
    "mcs" => Ignore,
    "nodes" => Copy,
    "partition" => Copy,
    "priority" => Ignore,
    "qos" => Ignore,
    "required" => Ignore,
    "kill_request_user" => Ignore,
    "reservation" => Ignore,
    "state" => Flatten(&[
        ("current", Rename("job_state")),
        ("reason", Rename("job_state_reason")),
    ]),
    "steps" => Ignore,
    "submit_line" => Ignore,
    "tres" => Flatten(&[
        ("allocated", Decode { key: "tres_allocated", grammar: Grammar::TresEntries }),
        ("requested", Decode { key: "tres_requested", grammar: Grammar::TresEntries }),
    ]),
    "user" => Rename("username"),
    "wckey" => Ignore,
    "working_directory" => Copy,
};
