use crate::{
    data::{
        item::Coord,
        schema::{OptionRef, Schema},
    },
    error::ResolutionError,
};

/// A layout reference together with the coordinate it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub reference: OptionRef,
    pub coord: Coord,
}

/// Sub-group with every reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSubgroup {
    pub name: String,
    /// Declared references, in declaration order.
    pub refs: Vec<OptionRef>,
    /// References that resolved, in declaration order.
    pub entries: Vec<LayoutEntry>,
}

/// Group (tab) with every sub-group resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub name: String,
    pub subgroups: Vec<ResolvedSubgroup>,
}

/// Presentation order of options, resolved against a schema once.
///
/// References that name nothing in the schema are dropped from the entries
/// and kept in [`Layout::failures`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    groups: Vec<ResolvedGroup>,
    failures: Vec<ResolutionError>,
}

impl Layout {
    pub fn build(schema: &Schema) -> Self {
        let mut failures = Vec::new();

        let groups = schema
            .groups()
            .iter()
            .map(|group| ResolvedGroup {
                name: group.name.clone(),
                subgroups: group
                    .subgroups
                    .iter()
                    .map(|sub| {
                        let mut entries = Vec::with_capacity(sub.options.len());
                        for reference in &sub.options {
                            match schema.resolve(&reference.section, &reference.option) {
                                Ok(coord) => entries.push(LayoutEntry {
                                    reference: reference.clone(),
                                    coord,
                                }),
                                Err(e) => {
                                    warn!("{} / {}: {e}, entry omitted", group.name, sub.name);
                                    failures.push(e);
                                }
                            }
                        }
                        ResolvedSubgroup {
                            name: sub.name.clone(),
                            refs: sub.options.clone(),
                            entries,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { groups, failures }
    }

    pub fn groups(&self) -> &[ResolvedGroup] {
        &self.groups
    }

    pub fn group(&self, group: usize) -> Option<&ResolvedGroup> {
        self.groups.get(group)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn subgroup_count(&self, group: usize) -> Option<usize> {
        self.groups.get(group).map(|g| g.subgroups.len())
    }

    fn subgroup(&self, group: usize, subgroup: usize) -> Option<&ResolvedSubgroup> {
        self.groups.get(group)?.subgroups.get(subgroup)
    }

    /// Declared references of a sub-group, resolved or not.
    pub fn option_refs(&self, group: usize, subgroup: usize) -> Option<&[OptionRef]> {
        self.subgroup(group, subgroup).map(|s| s.refs.as_slice())
    }

    /// Resolved entries of a sub-group.
    pub fn entries(&self, group: usize, subgroup: usize) -> Option<&[LayoutEntry]> {
        self.subgroup(group, subgroup).map(|s| s.entries.as_slice())
    }

    /// Cached coordinate of a reference, if the layout contains it.
    pub fn lookup(&self, section: &str, option: &str) -> Option<Coord> {
        self.groups
            .iter()
            .flat_map(|g| &g.subgroups)
            .flat_map(|s| &s.entries)
            .find(|e| e.reference.section == section && e.reference.option == option)
            .map(|e| e.coord)
    }

    /// Every coordinate shown in a group, in display order.
    pub fn group_coords(&self, group: usize) -> Vec<Coord> {
        self.groups
            .get(group)
            .map(|g| {
                g.subgroups
                    .iter()
                    .flat_map(|s| s.entries.iter().map(|e| e.coord))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// References that could not be resolved.
    pub fn failures(&self) -> &[ResolutionError] {
        &self.failures
    }
}
