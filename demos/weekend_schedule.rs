//! Weekend schedule example

use matilha_core::utils::MemoryStorage;
use matilha_core::{Avatar, Kennel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("matilha_core=info")),
        )
        .init();

    println!("🐾 Matilha Core - Weekend Schedule Example\n");

    let mut kennel = Kennel::new(MemoryStorage::seeded());
    let today = chrono::Local::now().date_naive();

    // 1. Registries start from the seed data
    println!("👤 Walkers:");
    for walker in kennel.list_walkers().await? {
        println!(
            "  ✓ {} {}",
            walker.name,
            walker.phone.as_deref().unwrap_or("")
        );
    }
    println!("🐶 Dogs:");
    for dog in kennel.list_dogs().await? {
        println!("  ✓ {}", dog.name);
    }
    println!();

    // 2. Register a new walker and schedule next Saturday
    let carla = kennel
        .create_walker("Carla", Some("21912345678"), Avatar::None)
        .await?;

    let mut next_saturday = today.succ_opt().ok_or("date out of range")?;
    while matilha_core::classify_day_kind(next_saturday) != matilha_core::SessionKind::Saturday {
        next_saturday = next_saturday.succ_opt().ok_or("date out of range")?;
    }

    let mut draft = kennel.new_session_draft();
    draft.set_date(&matilha_core::format_date(next_saturday));
    draft.comment = Some("Encontrar no ícone".to_string());
    let session = kennel.schedule_session(&draft, today).await?;
    println!("📅 Scheduled {}", session.title());

    kennel.add_walker_to_session(&session.id, &carla.id).await?;
    kennel.add_walker_to_session(&session.id, "p1").await?;
    for dog_id in ["1", "2", "5"] {
        kennel.add_dog_to_session(&session.id, dog_id).await?;
    }
    kennel.toggle_payment(&session.id, "1").await?;
    kennel.toggle_payment(&session.id, "2").await?;
    println!();

    // 3. Home screen
    let overview = kennel.overview(today).await?;
    for entry in &overview.sessions {
        let r = &entry.reconciliation;
        let summary = kennel.payment_summary(r);
        println!("{}", entry.session.title());
        println!(
            "  🐶 {} dogs  ✅ {} paid  ⚠️ {} pending",
            r.total_dogs, r.paid_dogs, r.pending_dogs
        );
        println!(
            "  💰 expected {} ({} / walker)",
            summary.expected,
            summary.expected_per_walker.as_deref().unwrap_or("-")
        );
        println!(
            "  ✅ received {} ({} / walker)",
            summary.received,
            summary.received_per_walker.as_deref().unwrap_or("-")
        );
        println!("  {}", summary.status);
    }
    if !overview.rejected.is_empty() {
        println!("\n⚠️ {} session(s) with invalid dates", overview.rejected.len());
    }

    Ok(())
}
