// Source map checks for transpiler output

/// Validate a source map and point its anonymous sources at the asset
///
/// Babel names the input `unknown` when no filename is given; those
/// entries are replaced by the asset's virtual path. Returns `None` (and
/// logs) when the map does not parse.
pub fn attribute_source_map(map_json: &str, virtual_path: &str) -> Option<String> {
    let mut map = match sourcemap::SourceMap::from_slice(map_json.as_bytes()) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(
                asset = virtual_path,
                error = %e,
                "Discarding invalid source map"
            );
            return None;
        }
    };

    for idx in 0..map.get_source_count() {
        if matches!(map.get_source(idx), Some("unknown") | Some("")) {
            map.set_source(idx, virtual_path);
        }
    }

    let mut out = Vec::new();
    if let Err(e) = map.to_writer(&mut out) {
        tracing::warn!(asset = virtual_path, error = %e, "Failed to serialize source map");
        return None;
    }
    String::from_utf8(out).ok()
}
