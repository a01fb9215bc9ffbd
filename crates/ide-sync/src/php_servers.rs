//! PHP web servers in `workspace.xml`

use ide_config::Server;
use ide_xml::Element;

use crate::error::Result;
use crate::merger::{EntityMerger, IdentityMode};

const PHP_SERVERS: &str = "PhpServers";
const PROJECT_DIR: &str = "$PROJECT_DIR$";

/// Path of a project-relative directory as the IDE stores it.
///
/// `.`, `./` and the empty string all mean the project directory itself.
pub fn project_path(local: &str) -> String {
    let trimmed = local.trim_start_matches("./").trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        PROJECT_DIR.to_string()
    } else {
        format!("{}/{}", PROJECT_DIR, trimmed)
    }
}

/// Servers listed under the `PhpServers` workspace component.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpServersMerger;

impl EntityMerger for PhpServersMerger {
    type Entity = Server;

    fn container<'a>(&self, root: &'a mut Element) -> &'a mut Element {
        root.find_or_create_child("component", &[("name", PHP_SERVERS)])
            .named_child("servers")
    }

    fn entity_tag(&self) -> &'static str {
        "server"
    }

    fn identity(&self) -> IdentityMode {
        IdentityMode::Assign("id")
    }

    fn populate(&self, element: &mut Element, server: &Server) -> Result<()> {
        element.set_attribute("host", server.host.as_str());
        element.set_attribute("port", server.port.to_string());
        element.set_attribute("use_path_mappings", "true");

        if server.mappings.is_empty() {
            return Ok(());
        }

        let mappings = element.named_child("path_mappings");
        for (local, remote) in &server.mappings {
            let local_root = project_path(local);
            mappings
                .find_or_create_child("mapping", &[("local-root", local_root.as_str())])
                .set_attribute("remote-root", remote.as_str());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("src", "$PROJECT_DIR$/src")]
    #[case("./src/", "$PROJECT_DIR$/src")]
    #[case("web/public", "$PROJECT_DIR$/web/public")]
    #[case(".", "$PROJECT_DIR$")]
    #[case("./", "$PROJECT_DIR$")]
    #[case("", "$PROJECT_DIR$")]
    fn test_project_path(#[case] local: &str, #[case] expected: &str) {
        assert_eq!(project_path(local), expected);
    }

    #[test]
    fn test_populate_keeps_unrelated_mappings() {
        let mut element = Element::new("server")
            .with_attribute("name", "web")
            .with_attribute("port", "80")
            .with_child(
                Element::new("path_mappings").with_child(
                    Element::new("mapping")
                        .with_attribute("local-root", "$PROJECT_DIR$/legacy")
                        .with_attribute("remote-root", "/opt/legacy"),
                ),
            );
        let mut server = Server::new("web", "localhost", 8080);
        server
            .mappings
            .insert("src".to_string(), "/var/www/src".to_string());

        PhpServersMerger.populate(&mut element, &server).unwrap();

        assert_eq!(element.attribute("host"), Some("localhost"));
        assert_eq!(element.attribute("port"), Some("8080"));
        assert_eq!(element.attribute("use_path_mappings"), Some("true"));

        let mappings = element.find_child("path_mappings", &[]).unwrap();
        let roots: Vec<_> = mappings
            .children()
            .iter()
            .map(|m| {
                (
                    m.attribute("local-root").unwrap(),
                    m.attribute("remote-root").unwrap(),
                )
            })
            .collect();
        assert_eq!(
            roots,
            vec![
                ("$PROJECT_DIR$/legacy", "/opt/legacy"),
                ("$PROJECT_DIR$/src", "/var/www/src"),
            ]
        );
    }
}
