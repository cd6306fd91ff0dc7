use std::sync::Arc;

use crate::options::table_options::BlockBasedTableOptions;

/// Builds block-based tables configured by a [`BlockBasedTableOptions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockBasedTableFactory {
    table_options: BlockBasedTableOptions,
}

pub fn new_block_based_table_factory(table_options: BlockBasedTableOptions) -> Arc<BlockBasedTableFactory> {
    Arc::new(BlockBasedTableFactory { table_options })
}

impl BlockBasedTableFactory {
    pub fn name(&self) -> &'static str {
        "BlockBasedTable"
    }

    pub fn table_options(&self) -> &BlockBasedTableOptions {
        &self.table_options
    }
}
