use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 开奖记录实体
/// 说明:
/// - draw_number 为外部开奖编号, 全局唯一 (唯一索引), 重复导入为幂等 no-op
/// - draw_date 以 YYYY-MM-DD 文本存储; 历史数据中无法解析的日期原样保留
/// - 记录一经写入不再修改 (append-only)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External draw identifier
    #[sea_orm(unique)]
    pub draw_number: i64,
    /// Canonical YYYY-MM-DD text (kept verbatim when unparseable)
    pub draw_date: String,
    pub number1: i32,
    pub number2: i32,
    pub number3: i32,
    pub number4: i32,
    pub number5: i32,
    pub number6: i32,
    pub strong_number: i32,
    /// Ledger insertion time (provenance, not draw time)
    pub created_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn numbers(&self) -> [i32; 6] {
        [
            self.number1,
            self.number2,
            self.number3,
            self.number4,
            self.number5,
            self.number6,
        ]
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
