use stress_model::WorkItem;

use super::{InvokerConfig, flags::ReservedFlags};

/// Arguments for `<binary> run --publish=<bool> [--rm] [flags] <name> [args]`.
pub fn build_run_args(cfg: &InvokerConfig, item: &WorkItem) -> Vec<String> {
    let reserved = ReservedFlags::new(cfg.remove);
    let flags = reserved.filter(&item.name, &item.flags);

    let mut args = Vec::with_capacity(3 + flags.len() + item.args.len());
    args.push("run".to_string());
    args.push(format!("--publish={}", item.publish));
    if cfg.remove {
        args.push("--rm".to_string());
    }
    args.extend(flags);
    args.push(item.name.clone());
    args.extend(item.args.iter().cloned());
    args
}
