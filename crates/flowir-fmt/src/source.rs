use flowir_core::source::Source;

/// One-line descriptor of a `from` trunk's source.
pub fn source(src: &Source) -> String {
    match src {
        Source::File {
            path,
            format,
            layout,
        } => {
            let mut s = format!("file {}", path);
            if let Some(format) = format.as_deref().filter(|f| !f.is_empty()) {
                s.push_str(&format!(" format {}", format));
            }
            if let Some(layout) = layout.as_ref().filter(|l| !l.is_nil()) {
                s.push_str(&format!(" order {}", layout));
            }
            s
        }
        Source::Http { url } => format!("get {}", url),
        Source::Pool { id } => format!("pool {}", id),
        Source::PoolMeta { id, meta } => format!("pool {}:{}", id, meta),
        Source::CommitMeta { pool, commit, meta } => format!("pool {}@{}:{}", pool, commit, meta),
        Source::LakeMeta { meta } => format!(":{}", meta),
        Source::Pass => "pass".to_string(),
        Source::Reader => "(internal reader)".to_string(),
        Source::Extension { kind } => format!("unknown source {}", kind),
    }
}
