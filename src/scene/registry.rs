use std::collections::HashMap;
use super::body::CelestialBody;

/// Index of a body in the scene's body table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Name lookup for mounted bodies. Matching ignores case.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    by_name: HashMap<String, BodyHandle>,
    names: Vec<String>,
    star: Option<BodyHandle>,
}

impl BodyRegistry {
    pub fn new(bodies: &[CelestialBody]) -> Self {
        let mut registry = Self::default();
        for (index, body) in bodies.iter().enumerate() {
            let handle = BodyHandle(index);
            registry.by_name.insert(body.name.to_lowercase(), handle);
            registry.names.push(body.name.clone());
            if body.is_star() && registry.star.is_none() {
                registry.star = Some(handle);
            }
        }
        registry
    }

    pub fn lookup(&self, name: &str) -> Option<BodyHandle> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Display name as written in the configuration
    pub fn name(&self, handle: BodyHandle) -> Option<&str> {
        self.names.get(handle.0).map(String::as_str)
    }

    pub fn star(&self) -> Option<BodyHandle> {
        self.star
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        (0..self.names.len()).map(BodyHandle)
    }

    /// Every non-star body in table order
    pub fn planets(&self) -> Vec<BodyHandle> {
        self.handles().filter(|h| Some(*h) != self.star).collect()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SystemConfig;

    fn sol() -> BodyRegistry {
        BodyRegistry::new(&SystemConfig::default().bodies)
    }

    #[test]
    fn test_lookup_ignores_case() {
        let registry = sol();
        assert_eq!(registry.lookup("earth"), Some(BodyHandle(3)));
        assert_eq!(registry.lookup("EARTH"), registry.lookup("Earth"));
        assert_eq!(registry.lookup(" Saturn "), Some(BodyHandle(6)));
        assert_eq!(registry.lookup("Vulcan"), None);
    }

    #[test]
    fn test_name_keeps_original_spelling() {
        let registry = sol();
        let handle = registry.lookup("jupiter").unwrap();
        assert_eq!(registry.name(handle), Some("Jupiter"));
        assert_eq!(registry.name(BodyHandle(99)), None);
    }

    #[test]
    fn test_planets_exclude_star() {
        let registry = sol();
        let planets = registry.planets();
        assert_eq!(planets.len(), 9);
        assert!(!planets.contains(&BodyHandle(0)));
        assert_eq!(registry.star(), Some(BodyHandle(0)));
    }
}
