use anyhow::Result;

use fakeplate_core::faker;

/// Print every expression path the built-in provider resolves.
pub fn run(json: bool) -> Result<()> {
    let paths = faker::provider().paths();
    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        for path in &paths {
            println!("%%{path}%%");
        }
    }
    Ok(())
}
