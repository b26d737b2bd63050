//! Decoding of the `appStoreVersions` JSON:API document.

use relwatch_core::StatusRecord;
use serde::Deserialize;

use crate::error::FetchError;

#[derive(Deserialize, Debug)]
struct VersionsDocument {
    #[serde(default)]
    data: Vec<VersionResource>,
    #[serde(default)]
    included: Vec<IncludedResource>,
}

#[derive(Deserialize, Debug)]
struct VersionResource {
    #[serde(default)]
    attributes: VersionAttributes,
    #[serde(default)]
    relationships: Option<VersionRelationships>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct VersionAttributes {
    platform: Option<String>,
    app_store_state: Option<String>,
    app_version_state: Option<String>,
    version_string: Option<String>,
    release_type: Option<String>,
    created_date: Option<String>,
}

#[derive(Deserialize, Debug)]
struct VersionRelationships {
    build: Option<Relationship>,
}

#[derive(Deserialize, Debug)]
struct Relationship {
    data: Option<ResourceRef>,
}

#[derive(Deserialize, Debug)]
struct ResourceRef {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

#[derive(Deserialize, Debug)]
struct IncludedResource {
    #[serde(rename = "type")]
    kind: String,
    id: String,
    #[serde(default)]
    attributes: serde_json::Value,
}

/// Turn a versions response body into a [`StatusRecord`].
///
/// Picks the first entry for `platform`. The build number comes from the
/// included `builds` resource the version links to.
pub fn parse_versions(body: &str, app_id: &str, platform: &str) -> Result<StatusRecord, FetchError> {
    let doc: VersionsDocument =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let version = doc
        .data
        .iter()
        .find(|v| v.attributes.platform.as_deref() == Some(platform))
        .ok_or_else(|| FetchError::NoPlatformVersion {
            app_id: app_id.to_string(),
            platform: platform.to_string(),
        })?;

    let attrs = &version.attributes;
    let version_string = attrs
        .version_string
        .clone()
        .ok_or_else(|| FetchError::Decode("version has no versionString".to_string()))?;
    let state = attrs
        .app_store_state
        .clone()
        .or_else(|| attrs.app_version_state.clone())
        .unwrap_or_default();

    let mut record = StatusRecord::new(
        state,
        version_string,
        attrs.release_type.clone().unwrap_or_default(),
    );
    if let Some(created) = &attrs.created_date {
        record = record.with_submitted_at(created.clone());
    }
    if let Some(build) = linked_build_number(version, &doc.included) {
        record = record.with_build(build);
    }
    Ok(record)
}

fn linked_build_number(version: &VersionResource, included: &[IncludedResource]) -> Option<String> {
    let link = version.relationships.as_ref()?.build.as_ref()?.data.as_ref()?;
    included
        .iter()
        .find(|r| r.kind == link.kind && r.id == link.id)
        .and_then(|r| r.attributes.get("version"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}
