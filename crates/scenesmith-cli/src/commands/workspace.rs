use anyhow::{Context, Result, bail};
use scenesmith_application::{MountOutcome, ScenesmithApp};
use scenesmith_core::chain::MacroChain;
use scenesmith_core::context::BlockType;
use scenesmith_infrastructure::UrlRouter;
use serde_json::Value;

/// Mounts the router's location and requires a project to come out of it.
async fn enter(app: &ScenesmithApp) -> Result<()> {
    match app.navigation.mount().await {
        MountOutcome::Restored { .. } | MountOutcome::AlreadyLoaded { .. } => Ok(()),
        MountOutcome::NoSession => bail!("No session id given"),
        MountOutcome::Failed { session_id, error } => {
            Err(error).with_context(|| format!("Failed to open project {session_id}"))
        }
        MountOutcome::Superseded { session_id } => bail!("Opening {session_id} was interrupted"),
    }
}

async fn print_tabs(app: &ScenesmithApp) {
    let state = app.workspace.state().await;
    if let Some(project) = &state.project {
        println!("{} ({})", project.title, project.id);
    }
    println!("Phase: {}", app.navigation.phase().await.label);

    for view in app.navigation.tab_views().await {
        let marker = if view.active { '*' } else { ' ' };
        let status = view.status.map(|s| s.to_string()).unwrap_or_default();
        let note = if view.enabled { "" } else { " (disabled)" };
        println!("{marker} {:<16} {status}{note}", view.title);
    }
}

pub async fn status(app: &ScenesmithApp) -> Result<()> {
    enter(app).await?;
    print_tabs(app).await;
    Ok(())
}

pub async fn open(app: &ScenesmithApp, router: &UrlRouter) -> Result<()> {
    match app.navigation.mount().await {
        MountOutcome::NoSession => println!("No project selected"),
        MountOutcome::Failed { session_id, error } => {
            println!("Could not open {session_id}: {error}");
        }
        MountOutcome::Superseded { session_id } => println!("Opening {session_id} was interrupted"),
        MountOutcome::Restored { .. } | MountOutcome::AlreadyLoaded { .. } => {
            print_tabs(app).await;
        }
    }
    println!("Location: {}", router.location());
    Ok(())
}

pub async fn characters(app: &ScenesmithApp) -> Result<()> {
    enter(app).await?;
    let roster = app.characters.list().await?;
    println!(
        "{} characters (version {}{})",
        roster.len(),
        roster.version,
        if roster.locked { ", locked" } else { "" }
    );
    for name in roster.names() {
        println!("  {name}");
    }
    Ok(())
}

pub async fn health(app: &ScenesmithApp) -> Result<()> {
    enter(app).await?;
    let health = app.context.health().await?;
    if !health.exists {
        println!("No context stored for {}", health.session_id);
        return Ok(());
    }
    println!("Context for {}", health.session_id);
    if let Some(version) = health.version {
        println!("  version:      {version}");
    }
    if let Some(blocks) = health.blocks_count {
        println!("  blocks:       {blocks}");
    }
    if let Some(chains) = health.macro_chain_count {
        println!("  macro chains: {chains}");
    }
    if let Some(updated) = &health.updated_at {
        println!("  updated:      {updated}");
    }
    Ok(())
}

pub async fn lock(app: &ScenesmithApp, block_type: &str, locked: bool) -> Result<()> {
    let block_type = BlockType::parse(block_type)?;
    enter(app).await?;
    app.context.lock_block(block_type, locked).await?;
    println!(
        "{} {}",
        if locked { "Locked" } else { "Unlocked" },
        block_type
    );
    print_tabs(app).await;
    Ok(())
}

pub async fn generate_chain(app: &ScenesmithApp, concept: &str, meta: Option<&str>) -> Result<()> {
    let meta = meta
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--meta must be valid JSON")?;
    enter(app).await?;

    let chain = app.chains.generate_chain(concept, meta).await?;
    print_chain(&chain);
    Ok(())
}

fn print_chain(chain: &MacroChain) {
    println!("Chain {} ({} scenes)", chain.chain_id, chain.scenes.len());
    let mut scenes: Vec<_> = chain.scenes.iter().collect();
    scenes.sort_by_key(|scene| scene.order);
    for scene in scenes {
        println!("{:>3}. {}", scene.order, scene.title);
        if !scene.objective.is_empty() {
            println!("     {}", scene.objective);
        }
    }
}
