use anyhow::Result;
use scenesmith_application::ScenesmithApp;

pub async fn list(app: &ScenesmithApp) -> Result<()> {
    let projects = app.projects.list_projects().await?;
    if projects.is_empty() {
        println!("No projects yet. Create one with `scenesmith projects create <title>`.");
        return Ok(());
    }

    let width = projects.iter().map(|p| p.id.len()).max().unwrap_or(0);
    for project in &projects {
        let updated = project
            .updated_at_utc()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<width$}  {}  {}", project.id, updated, project.title);
    }
    Ok(())
}

pub async fn create(app: &ScenesmithApp, title: &str) -> Result<()> {
    let project = app.projects.create_project(title).await?;
    println!("Created project {} ({})", project.id, project.title);
    Ok(())
}

pub async fn delete(app: &ScenesmithApp, id: &str) -> Result<()> {
    app.projects.delete_project(id).await?;
    println!("Deleted project {id}");
    Ok(())
}
