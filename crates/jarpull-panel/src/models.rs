//! Wire types for the Pterodactyl client API.
//!
//! Response envelopes follow the panel's `{data: [{attributes: {...}}]}`
//! convention; request bodies are the exact JSON shapes the file endpoints
//! expect.

use serde::{Deserialize, Serialize};

/// Response envelope for `GET /api/client`.
#[derive(Debug, Deserialize)]
pub struct ClientListResponse {
    /// Server records, one envelope per server.
    #[serde(default)]
    pub data: Vec<ServerEnvelope>,
}

/// One `{object: "server", attributes: {...}}` entry.
#[derive(Debug, Deserialize)]
pub struct ServerEnvelope {
    /// The server's attributes.
    pub attributes: ServerAttributes,
}

/// The subset of server attributes this client consumes.
#[derive(Debug, Deserialize)]
pub struct ServerAttributes {
    /// Short identifier used in API paths.
    pub identifier: String,
    /// Display name.
    pub name: String,
}

/// Request body for `POST /api/client/servers/{id}/files/pull`.
#[derive(Debug, Serialize)]
pub struct PullFileBody<'a> {
    /// Remote URL to pull.
    pub url: &'a str,
    /// Destination directory inside the server's file space.
    pub directory: &'a str,
    /// Destination filename.
    pub filename: &'a str,
}

/// Request body for `POST /api/client/servers/{id}/files/decompress`.
#[derive(Debug, Serialize)]
pub struct DecompressBody<'a> {
    /// Directory containing the archive.
    pub root: &'a str,
    /// Archive filename to decompress.
    pub file: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_list_extraction() {
        let raw = json!({
            "object": "list",
            "data": [
                {"object": "server", "attributes": {"identifier": "d3adb33f", "name": "Survival", "node": "node-1"}},
                {"object": "server", "attributes": {"identifier": "c0ffee00", "name": "Creative"}}
            ]
        });

        let parsed: ClientListResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].attributes.identifier, "d3adb33f");
        assert_eq!(parsed.data[1].attributes.name, "Creative");
    }

    #[test]
    fn test_empty_list_defaults() {
        let parsed: ClientListResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_pull_body_shape() {
        let body = PullFileBody {
            url: "https://s3.mcjars.app/paper/1.21.8/server.jar",
            directory: "/",
            filename: "server.jar",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "url": "https://s3.mcjars.app/paper/1.21.8/server.jar",
                "directory": "/",
                "filename": "server.jar"
            })
        );
    }

    #[test]
    fn test_decompress_body_shape() {
        let body = DecompressBody {
            root: "/",
            file: "installer.zip",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, json!({"root": "/", "file": "installer.zip"}));
    }
}
