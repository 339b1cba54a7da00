//! Published video listing.

use fresco::{FrescoConfig, FrescoResult, JsonError, Publisher};

/// Handle the `list` command.
pub async fn list_videos(config: &FrescoConfig, json: bool) -> FrescoResult<()> {
    let publisher = Publisher::new(config.paths.publish_dir.clone());
    let names = publisher.list_published().await?;

    if json {
        let entries: Vec<_> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "path": publisher.path_for(name),
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries)
            .map_err(|e| JsonError::new(format!("Failed to encode listing: {}", e)))?;
        println!("{}", text);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
