//! JSON export of a project and its selected assets.
//!
//! Output goes to `<export_dir>/<project-name>-export.json`, with whitespace
//! and path separators in the project name replaced by `-`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tagger_core::environment::{Clock, ExportProvider, ServiceFuture};
use tagger_core::error::Result;
use tagger_core::model::{Asset, ExportProviderOptions, Project, ProjectId, Tag};

/// Document written by [`JsonExportProvider`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    id: &'a ProjectId,
    name: &'a str,
    version: &'a str,
    exported_at: DateTime<Utc>,
    tags: &'a [Tag],
    assets: Vec<&'a Asset>,
}

/// Writes the project and the assets selected by
/// [`ExportProviderOptions::asset_state`] as pretty-printed JSON.
pub struct JsonExportProvider {
    project: Project,
    options: ExportProviderOptions,
    export_dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl JsonExportProvider {
    /// Create a provider for `project`
    #[must_use]
    pub fn new(
        project: Project,
        options: ExportProviderOptions,
        export_dir: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            project,
            options,
            export_dir,
            clock,
        }
    }

    /// File the export is written to
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.export_dir.join(export_file_name(&self.project.name))
    }

    /// Assets selected by the options, ordered by name then ID
    fn selected_assets(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self
            .project
            .assets
            .values()
            .filter(|asset| self.options.asset_state.includes(asset))
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        assets
    }

    fn render(&self) -> Result<Vec<u8>> {
        let document = ExportDocument {
            id: &self.project.id,
            name: &self.project.name,
            version: &self.project.version,
            exported_at: self.clock.now(),
            tags: &self.project.tags,
            assets: self.selected_assets(),
        };
        Ok(serde_json::to_vec_pretty(&document)?)
    }
}

impl std::fmt::Debug for JsonExportProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonExportProvider")
            .field("project", &self.project.name)
            .field("options", &self.options)
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}

impl ExportProvider for JsonExportProvider {
    fn export(&self) -> ServiceFuture<'_, ()> {
        Box::pin(async move {
            let contents = self.render()?;
            let path = self.output_path();

            tokio::fs::create_dir_all(&self.export_dir).await?;
            tokio::fs::write(&path, &contents).await?;

            tracing::info!(
                project = %self.project.name,
                path = %path.display(),
                bytes = contents.len(),
                "Project exported"
            );
            Ok(())
        })
    }
}

fn export_file_name(project_name: &str) -> String {
    let stem: String = project_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .collect();
    format!("{stem}-export.json")
}

/// Read back an export written to `path`
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid JSON.
pub async fn read_export(path: &Path) -> Result<serde_json::Value> {
    let contents = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&contents)?)
}
