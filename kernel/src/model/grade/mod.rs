use crate::model::id::{GradeId, SectionId};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub id: GradeId,
    pub name: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub grade_id: GradeId,
    pub name: String,
    pub alias: Option<String>,
}

impl Grade {
    /// Groups sections under their grades, keeping the order of `grades`.
    pub fn assemble(grades: Vec<(GradeId, String)>, sections: Vec<Section>) -> Vec<Grade> {
        grades
            .into_iter()
            .map(|(id, name)| Grade {
                id,
                name,
                sections: sections
                    .iter()
                    .filter(|s| s.grade_id == id)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_attached_to_their_grade() {
        let first = GradeId::new();
        let second = GradeId::new();
        let section = |grade_id, name: &str| Section {
            id: SectionId::new(),
            grade_id,
            name: name.into(),
            alias: None,
        };
        let sections = vec![section(first, "A"), section(second, "A"), section(first, "B")];

        let grades = Grade::assemble(
            vec![(first, "1ro".into()), (second, "2do".into())],
            sections,
        );

        assert_eq!(grades.len(), 2);
        let names: Vec<_> = grades[0].sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(grades[1].sections.len(), 1);
    }
}
