/// An environment id split into `[namespace/]name[-vN]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvId<'a> {
    pub namespace: Option<&'a str>,
    pub name: &'a str,
    pub version: Option<u32>,
}

impl<'a> EnvId<'a> {
    pub fn parse(id: &'a str) -> Self {
        let (namespace, rest) = match id.split_once('/') {
            Some((ns, rest)) => (Some(ns), rest),
            None => (None, id),
        };
        let (name, version) = match rest.rsplit_once("-v") {
            Some((name, v)) if !name.is_empty() => match v.parse() {
                Ok(version) => (name, Some(version)),
                Err(_) => (rest, None),
            },
            _ => (rest, None),
        };
        Self {
            namespace,
            name,
            version,
        }
    }

    /// Same namespace and name, ignoring the version.
    pub fn same_family(&self, other: &EnvId<'_>) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespace_name_and_version() {
        assert_eq!(
            EnvId::parse("ALE/Pong-v5"),
            EnvId {
                namespace: Some("ALE"),
                name: "Pong",
                version: Some(5)
            }
        );
        assert_eq!(
            EnvId::parse("AntMaze_BigMaze_DG-v5"),
            EnvId {
                namespace: None,
                name: "AntMaze_BigMaze_DG",
                version: Some(5)
            }
        );
    }

    #[test]
    fn unversioned_ids_keep_their_whole_name() {
        let id = EnvId::parse("CartPole");
        assert_eq!(id.name, "CartPole");
        assert_eq!(id.version, None);
        assert_eq!(EnvId::parse("Foo-vX").name, "Foo-vX");
    }
}
