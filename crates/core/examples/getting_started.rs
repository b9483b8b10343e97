use cellwatch::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== Cellwatch - Getting Started ===\n");

    let tracker = Tracker::new();
    println!("✓ Created tracker at resolution {}\n", tracker.resolution());

    // === CELL INDEXING ===
    println!("1. Cell Indexing");
    println!("----------------");

    let sf = index(37.7749, -122.4194, 8)?;
    let sf_nearby = index(37.7750, -122.4195, 8)?;
    println!("   San Francisco      -> {}", sf);
    println!("   A few meters away  -> {}", sf_nearby);
    println!("   Same cell: {}\n", sf == sf_nearby);

    // === NEIGHBORHOODS ===
    println!("2. Neighborhoods");
    println!("----------------");

    for k in 0..=2 {
        let ring = neighbors(&sf, k);
        println!("   ring {} -> {} cells", k, ring.len());
    }
    println!();

    // === ASSETS ===
    println!("3. Asset Tracking");
    println!("-----------------");

    for (name, lat, lon) in [
        ("generator", 37.7749, -122.4194),
        ("pump", 37.7750, -122.4195),
        ("crane", 51.5074, -0.1278),
    ] {
        let asset = tracker.create_asset(AssetInput {
            name: name.into(),
            asset_type: "equipment".into(),
            latitude: lat,
            longitude: lon,
            status: "active".into(),
            created_by: "example".into(),
        })?;
        println!("   {:<10} stamped with {}", asset.name, asset.cell_id);
    }

    let near = tracker.assets_near(37.7749, -122.4194)?;
    println!("   Assets near San Francisco:");
    for asset in &near {
        println!("     - {}", asset.name);
    }
    println!();

    // === ANALYTICS ===
    println!("4. Region Summary");
    println!("-----------------");
    for (cell, count) in tracker.region_summary() {
        println!("   {} -> {} asset(s)", cell, count);
    }
    println!();

    // === INVALID INPUT ===
    println!("5. Input Validation");
    println!("-------------------");
    match index(91.0, 0.0, 8) {
        Err(e) => println!("   index(91, 0, 8)  -> {}", e),
        Ok(cell) => println!("   unexpected cell {}", cell),
    }
    match index(0.0, 0.0, 999) {
        Err(e) => println!("   index(0, 0, 999) -> {}", e),
        Ok(cell) => println!("   unexpected cell {}", cell),
    }

    let stats = tracker.stats();
    println!(
        "\n✓ {} assets, {} audit events",
        stats.assets, stats.audit_events
    );

    Ok(())
}
