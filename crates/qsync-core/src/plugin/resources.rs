//! Marks snapshot resource directories as resource roots

use super::{ModuleUpdate, SyncPlugin};
use crate::Result;
use crate::config::LanguageClass;
use crate::model::{SourceRootProperties, SourceRootType};
use crate::sync::SyncContext;

/// Adds each resource directory of an Android-enabled module as a resource
/// folder of the content entry that contains it.
///
/// Directories outside every content entry are skipped: a source folder
/// cannot exist without a content root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceRootsPlugin;

impl SyncPlugin for ResourceRootsPlugin {
    fn name(&self) -> &str {
        "resource-roots"
    }

    fn update_project_structure(
        &self,
        update: &mut ModuleUpdate<'_>,
        _context: &mut SyncContext,
    ) -> Result<()> {
        if !update
            .language_settings
            .is_language_active(LanguageClass::Android)
        {
            return Ok(());
        }

        for dir in &update.resource_directories {
            let url = update.workspace_root.absolute_path_for(dir).to_ide_url();
            let entry = update
                .roots
                .content_entries_mut()
                .iter_mut()
                .find(|entry| entry.contains_url(&url));
            match entry {
                Some(entry) => {
                    let already_present = entry.source_folders().iter().any(|f| f.url == url);
                    if !already_present {
                        entry.add_source_folder(
                            url,
                            SourceRootType::Resource,
                            SourceRootProperties::default(),
                        );
                    }
                }
                None => tracing::debug!(
                    module = update.module_name,
                    dir = %dir,
                    "Resource directory outside all content entries"
                ),
            }
        }
        Ok(())
    }
}
