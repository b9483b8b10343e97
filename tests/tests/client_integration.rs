use cellwatch::{AuditAction, Tracker};
use cellwatch_client::CellwatchClient;
use cellwatch_server::run_server;
use cellwatch_types::record::{AssetInput, IncidentInput, UserInput};
use uuid::Uuid;

/// Start a server on an ephemeral port and return a client pointed at it.
async fn spawn_server(tracker: Tracker) -> anyhow::Result<CellwatchClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = run_server(listener, tracker, futures::future::pending()).await;
    });

    let client = CellwatchClient::new(&format!("http://{addr}"))?;

    // Wait until the server answers
    for _ in 0..50 {
        if client.health().await.is_ok() {
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }
    Ok(client)
}

fn asset(name: &str, latitude: f64, longitude: f64) -> AssetInput {
    AssetInput {
        name: name.to_string(),
        asset_type: "vehicle".to_string(),
        latitude,
        longitude,
        status: "active".to_string(),
        created_by: "dispatch".to_string(),
    }
}

#[tokio::test]
async fn test_proximity_scenario() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let client = spawn_server(Tracker::new()).await?;

    let a = client.create_asset(&asset("A", 37.7749, -122.4194)).await?;
    let b = client.create_asset(&asset("B", 37.7750, -122.4195)).await?;
    let c = client.create_asset(&asset("C", 51.5074, -0.1278)).await?;
    assert_eq!(a.cell_id, b.cell_id);
    assert_ne!(a.cell_id, c.cell_id);

    let near = client.assets_near(37.7749, -122.4194).await?;
    let ids: Vec<_> = near.iter().map(|asset| asset.id).collect();
    assert!(ids.contains(&a.id));
    assert!(ids.contains(&b.id));
    assert!(!ids.contains(&c.id));

    let in_cell = client.assets_in_cell(&c.cell_id).await?;
    assert_eq!(in_cell, vec![c.clone()]);

    let summary = client.region_summary().await?;
    assert_eq!(summary.get(&a.cell_id), Some(&2));
    assert_eq!(summary.get(&c.cell_id), Some(&1));

    let stats = client.stats().await?;
    assert_eq!(stats.assets, 3);
    assert_eq!(stats.operations_count, 3);

    Ok(())
}

#[tokio::test]
async fn test_errors_over_the_wire() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let client = spawn_server(Tracker::new()).await?;

    let err = client
        .create_asset(&asset("bad", 100.0, 0.0))
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

    let missing = Uuid::new_v4();
    let err = client.asset(missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Asset not found"));

    let err = client.delete_user(missing).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(client.assets().await?.is_empty());
    assert!(client.audit_logs().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_crud_and_audit_trail() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let client = spawn_server(Tracker::new()).await?;

    let user = client
        .create_user(&UserInput {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            role: "field".to_string(),
            region: "west".to_string(),
        })
        .await?;

    let truck = client.create_asset(&asset("Truck", 37.7749, -122.4194)).await?;
    let moved = client
        .update_asset(truck.id, &asset("Truck", 51.5074, -0.1278))
        .await?;
    assert_eq!(moved.id, truck.id);
    assert_ne!(moved.cell_id, truck.cell_id);
    assert!(client.assets_in_cell(&truck.cell_id).await?.is_empty());

    let incident = client
        .create_incident(&IncidentInput {
            asset_id: truck.id.to_string(),
            description: "engine light".to_string(),
            severity: "medium".to_string(),
            latitude: 51.5074,
            longitude: -0.1278,
            reported_by: user.id.to_string(),
        })
        .await?;
    assert_eq!(incident.cell_id, moved.cell_id);
    assert_eq!(client.incidents_in_cell(&moved.cell_id).await?.len(), 1);

    let message = client.delete_incident(incident.id).await?;
    assert_eq!(message.message, "Incident deleted");

    let log = client.audit_logs().await?;
    let actions: Vec<_> = log.iter().map(|event| event.action).collect();
    assert_eq!(
        actions,
        vec![
            AuditAction::CreateUser,
            AuditAction::CreateAsset,
            AuditAction::UpdateAsset,
            AuditAction::CreateIncident,
            AuditAction::DeleteIncident,
        ]
    );
    assert_eq!(log[2].entity_id, truck.id);
    assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    Ok(())
}
