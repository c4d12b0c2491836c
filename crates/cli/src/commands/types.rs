use anyhow::Result;
use ifacegen_core::InterfaceMaker;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

pub fn types_command(files: &[PathBuf], json: bool) -> Result<()> {
    let counts = InterfaceMaker::receiver_counts(files)?;
    debug!("Found {} receiver type(s)", counts.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", render_counts(&counts));
    }
    Ok(())
}

/// One `<count>\t<type>` line per receiver type, sorted by type name.
pub fn render_counts(counts: &BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(name, count)| format!("{count}\t{name}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts() {
        let counts = BTreeMap::from([("Store".to_string(), 3), ("Cache".to_string(), 1)]);
        assert_eq!(render_counts(&counts), "1\tCache\n3\tStore\n");
    }

    #[test]
    fn test_render_counts_empty() {
        assert_eq!(render_counts(&BTreeMap::new()), "");
    }
}
