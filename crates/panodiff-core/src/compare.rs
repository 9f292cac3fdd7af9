// Comparison pipeline: fetch both snapshots, filter to the selected scope,
// serialize, and diff. This is the one operation the CLI drives.

use tracing::{info, warn};

use panodiff_api::{ConfigKind, PanoramaClient};

use crate::diff;
use crate::error::CoreError;
use crate::selector::{self, PathExpr, Scope};
use crate::xml::Document;

/// Result of comparing the running and candidate configuration for a scope.
#[derive(Debug, Clone)]
pub struct ScopedDiff {
    scope: Scope,
    diff: String,
}

impl ScopedDiff {
    /// The scope that was compared.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The unified diff text, running to candidate. Empty when the two
    /// snapshots agree on the selected subtree.
    pub fn text(&self) -> &str {
        &self.diff
    }

    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Fetch, filter, and diff the selected subtree of both snapshots.
///
/// The two fetches run sequentially (candidate first, matching the order
/// the appliance is queried for a pending commit review). Diff direction
/// is fixed: what changed from running to candidate.
pub async fn diff_scoped_config(
    client: &PanoramaClient,
    scope: &Scope,
) -> Result<ScopedDiff, CoreError> {
    let path = PathExpr::parse(&scope.xpath())?;

    let candidate = fetch_filtered(client, ConfigKind::Candidate, &path).await?;
    let running = fetch_filtered(client, ConfigKind::Running, &path).await?;

    info!(xpath = path.as_str(), "generating configuration diff");
    let diff = diff::unified_diff(&running.to_pretty_string(), &candidate.to_pretty_string());

    Ok(ScopedDiff {
        scope: scope.clone(),
        diff,
    })
}

/// Fetch one snapshot and narrow it to the selected subtree.
async fn fetch_filtered(
    client: &PanoramaClient,
    kind: ConfigKind,
    path: &PathExpr,
) -> Result<Document, CoreError> {
    let body = client
        .show_config(kind)
        .await
        .map_err(|source| CoreError::Fetch {
            config: kind.label().to_owned(),
            source,
        })?;

    let doc = Document::parse(&body)?;

    let Some(matched) = selector::first_match(doc, path) else {
        warn!(
            config = kind.label(),
            xpath = path.as_str(),
            "no matching elements for selector"
        );
        return Err(CoreError::SelectorNotFound {
            xpath: path.as_str().to_owned(),
            config: kind.label().to_owned(),
        });
    };

    Ok(selector::wrap(matched))
}
