//! Board projection: stage columns derived from the flat lead collection.
//!
//! The board is never stored — it is recomputed from (leads, active
//! pipeline, stage catalog) on every request, so the column view cannot
//! drift from the source list.

use crate::pipeline::StageCatalog;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// BoardItem
// ---------------------------------------------------------------------------

/// Accessor trait for anything that can sit on a board column.
///
/// Implemented by the db crate's lead row so the projection stays in this
/// crate without a dependency on the storage layer.
pub trait BoardItem {
    fn pipeline_id(&self) -> Option<DbId>;
    fn stage_id(&self) -> Option<DbId>;
}

// ---------------------------------------------------------------------------
// BoardColumn
// ---------------------------------------------------------------------------

/// One stage column with its assigned items, in catalog order.
#[derive(Debug)]
pub struct BoardColumn<'a, T> {
    pub stage_id: DbId,
    pub items: Vec<&'a T>,
}

/// Derive the column view for one pipeline.
///
/// Items are kept in their incoming relative order within each column; no
/// independent sort is applied. Items whose pipeline differs from the
/// catalog's, or which have no stage, do not appear in any column.
pub fn board_columns<'a, T: BoardItem>(
    catalog: &StageCatalog,
    items: &'a [T],
) -> Vec<BoardColumn<'a, T>> {
    catalog
        .stages()
        .iter()
        .map(|stage| BoardColumn {
            stage_id: stage.id,
            items: items
                .iter()
                .filter(|item| {
                    item.pipeline_id() == Some(catalog.pipeline_id())
                        && item.stage_id() == Some(stage.id)
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageDef;

    struct Card {
        id: DbId,
        pipeline_id: Option<DbId>,
        stage_id: Option<DbId>,
    }

    impl BoardItem for Card {
        fn pipeline_id(&self) -> Option<DbId> {
            self.pipeline_id
        }
        fn stage_id(&self) -> Option<DbId> {
            self.stage_id
        }
    }

    fn card(id: DbId, pipeline_id: DbId, stage_id: DbId) -> Card {
        Card {
            id,
            pipeline_id: Some(pipeline_id),
            stage_id: Some(stage_id),
        }
    }

    fn catalog() -> StageCatalog {
        let stage = |id, sort| StageDef {
            id,
            pipeline_id: 1,
            name: format!("s{id}"),
            sort_order: sort,
            color: None,
            required: false,
        };
        StageCatalog::new(1, vec![stage(10, 0), stage(11, 1), stage(12, 2)])
    }

    #[test]
    fn groups_by_stage_in_catalog_order() {
        let leads = vec![card(1, 1, 11), card(2, 1, 10), card(3, 1, 11)];
        let columns = board_columns(&catalog(), &leads);

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].stage_id, 10);
        assert_eq!(columns[0].items.len(), 1);
        assert_eq!(columns[1].stage_id, 11);
        assert_eq!(columns[1].items.len(), 2);
        assert!(columns[2].items.is_empty());
    }

    #[test]
    fn preserves_incoming_relative_order() {
        let leads = vec![card(5, 1, 10), card(3, 1, 10), card(9, 1, 10)];
        let columns = board_columns(&catalog(), &leads);
        let ids: Vec<DbId> = columns[0].items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn excludes_other_pipelines() {
        let leads = vec![card(1, 2, 10)];
        let columns = board_columns(&catalog(), &leads);
        assert!(columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn excludes_unassigned_leads() {
        let leads = vec![Card {
            id: 1,
            pipeline_id: Some(1),
            stage_id: None,
        }];
        let columns = board_columns(&catalog(), &leads);
        assert!(columns.iter().all(|c| c.items.is_empty()));
    }

    #[test]
    fn recompute_is_stable() {
        let leads = vec![card(1, 1, 10), card(2, 1, 11)];
        let first: Vec<Vec<DbId>> = board_columns(&catalog(), &leads)
            .iter()
            .map(|c| c.items.iter().map(|i| i.id).collect())
            .collect();
        let second: Vec<Vec<DbId>> = board_columns(&catalog(), &leads)
            .iter()
            .map(|c| c.items.iter().map(|i| i.id).collect())
            .collect();
        assert_eq!(first, second);
    }
}
