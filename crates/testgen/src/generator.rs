use std::collections::BTreeSet;

use fdnorm_core::{AttributeSet, FunctionalDependency, RelationDescription};
use rand::distr::{Distribution, Uniform};
use rand::RngExt;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct RelationParams {
    #[builder(default)]
    pub id: u64,
    pub n_attribute: u64,
    pub n_dependency: u64,
    #[builder(default = 2)]
    pub max_determinant: u64,
    #[builder(default)]
    pub n_part: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneratedRelation {
    params: RelationParams,
    data: RelationDescription<String>,
}

impl GeneratedRelation {
    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_data(&self) -> &RelationDescription<String> {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> RelationDescription<String> {
        self.data
    }

    #[must_use]
    pub const fn get_params(&self) -> &RelationParams {
        &self.params
    }
}

/// Name of the `index`-th attribute: `A` to `Z`, then `A1` to `Z1`, and so on.
#[must_use]
pub fn attribute_name(index: u64) -> String {
    const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    #[allow(clippy::cast_possible_truncation)]
    let letter = char::from(LETTERS[(index % 26) as usize]);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

/// Generate a single relation over `n_attribute` attributes.
///
/// Every dependency has a determinant of one to `max_determinant` distinct
/// attributes and a dependent of one or two attributes outside it, so the
/// generated dependencies are never trivial. Each of the `n_part` parts is a
/// non-empty random subset of the universe; the parts are not guaranteed to
/// cover it.
///
/// With fewer than two attributes no dependency can be drawn and only the
/// universe (and parts, if any) is returned.
#[must_use]
pub fn generate_single_relation(
    n_attribute: u64,
    n_dependency: u64,
    max_determinant: u64,
    n_part: u64,
) -> RelationDescription<String> {
    let names: Vec<String> = (0..n_attribute).map(attribute_name).collect();
    let mut relation = RelationDescription::new(names.iter().cloned().collect());
    let Ok(attribute_range) = Uniform::new(0, names.len()) else {
        return relation;
    };
    let mut random_generator = rand::rng();

    if names.len() > 1 {
        let max_determinant = usize::try_from(max_determinant)
            .unwrap_or(usize::MAX)
            .clamp(1, names.len() - 1);
        relation.dependencies = (0..n_dependency)
            .map(|_| {
                let size = random_generator.random_range(1..=max_determinant);
                let mut determinant = BTreeSet::new();
                while determinant.len() < size {
                    determinant.insert(attribute_range.sample(&mut random_generator));
                }

                let wanted = if random_generator.random::<bool>() { 2 } else { 1 };
                let mut dependent = BTreeSet::new();
                while dependent.len() < wanted.min(names.len() - determinant.len()) {
                    let attribute = attribute_range.sample(&mut random_generator);
                    if !determinant.contains(&attribute) {
                        dependent.insert(attribute);
                    }
                }

                FunctionalDependency::new(
                    determinant.iter().map(|&i| names[i].clone()).collect(),
                    dependent.iter().map(|&i| names[i].clone()).collect(),
                )
            })
            .collect();
    }

    relation.decomposition = (0..n_part)
        .map(|_| {
            let mut part: AttributeSet<String> = names
                .iter()
                .filter(|_| random_generator.random::<bool>())
                .cloned()
                .collect();
            if part.is_empty() {
                part.insert(names[attribute_range.sample(&mut random_generator)].clone());
            }
            part
        })
        .collect();

    relation
}

#[must_use]
pub fn generate_mult_relations(
    n_relation: u64,
    n_attribute: u64,
    n_dependency: u64,
    max_determinant: u64,
    n_part: u64,
) -> Vec<GeneratedRelation> {
    (0..n_relation)
        .into_par_iter()
        .map(|i_relation| GeneratedRelation {
            params: RelationParams {
                id: i_relation,
                n_attribute,
                n_dependency,
                max_determinant,
                n_part,
            },
            data: generate_single_relation(n_attribute, n_dependency, max_determinant, n_part),
        })
        .collect()
}
