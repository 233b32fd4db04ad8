// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use sqlayer_catalog::{Catalog, ColumnDef, GroupSelector, IndexDef, JoinColumn, PRIMARY, TableName};
use sqlayer_ddl::{
	AlterBuilder, AlterTableDdl, ChangeLevel, DdlFunctions, ExecutionContext, RewriteStrategy, Session, StagedTable,
	TableChange, TableCopier,
	ast::{
		AstAlterGroup, AstAlterTable, AstAlterTableOperation, AstColumnDefinition, AstColumnModification,
		AstConstraint, AstConstraintKind, AstDropConstraint, AstForeignKey, AstIdentity, AstIdentityChange,
		AstTableElement, QualifiedName,
	},
};
use sqlayer_testing::{CatalogBuilder, DdlEvent, MemoryDdl, init_tracing};
use sqlayer_type::{Type, TypeDescriptor, diagnostic::code, err};

fn alter(ddl: &MemoryDdl, table: &str, elements: Vec<AstTableElement>) -> sqlayer_type::Result<Option<ChangeLevel>> {
	alter_with(ddl, table, elements, &ExecutionContext::new())
}

fn alter_with(
	ddl: &MemoryDdl,
	table: &str,
	elements: Vec<AstTableElement>,
	ctx: &ExecutionContext,
) -> sqlayer_type::Result<Option<ChangeLevel>> {
	init_tracing();
	let ast = AstAlterTable::elements(QualifiedName::new(table), elements);
	AlterTableDdl::default().alter_table(ddl, ddl, &Session::default(), "test", &ast, ctx)
}

fn fk(columns: &[&str], parent: &str, parent_columns: &[&str]) -> AstTableElement {
	AstTableElement::AddForeignKey(AstForeignKey::grouping(
		columns.iter().copied(),
		QualifiedName::new(parent),
		parent_columns.iter().copied(),
	))
}

fn drop_fk() -> AstTableElement {
	AstTableElement::DropForeignKey {
		grouping: true,
		name: None,
	}
}

fn drop_column(name: &str) -> AstTableElement {
	AstTableElement::DropColumn {
		name: name.into(),
	}
}

/// `c(cid PK)` and `o(oid PK, cid)`, not joined
fn ungrouped() -> Catalog {
	CatalogBuilder::new("test")
		.table("c")
		.column("cid", Type::BigInt)
		.not_null()
		.pk(["cid"])
		.table("o")
		.column("oid", Type::BigInt)
		.not_null()
		.column("cid", Type::BigInt)
		.pk(["oid"])
		.build()
		.unwrap()
}

/// `c <- o <- i`, with a name on `c` and an index on `o.note`
fn three_table_group() -> Catalog {
	CatalogBuilder::new("test")
		.table("c")
		.column("cid", Type::BigInt)
		.not_null()
		.column("name", TypeDescriptor::varchar(32))
		.pk(["cid"])
		.table("o")
		.column("oid", Type::BigInt)
		.not_null()
		.column("cid", Type::BigInt)
		.column("note", TypeDescriptor::varchar(64))
		.column("qty", Type::Int)
		.default_value("300")
		.pk(["oid"])
		.index("by_note", ["note"])
		.unique("by_cid_note", ["cid", "note"])
		.join_to("c", [("cid", "cid")])
		.table("i")
		.column("iid", Type::BigInt)
		.not_null()
		.column("oid", Type::BigInt)
		.pk(["iid"])
		.join_to("o", [("oid", "oid")])
		.build()
		.unwrap()
}

mod grouping {
	use super::*;

	#[test]
	fn test_add_grouping_fk() {
		let ddl = MemoryDdl::new(ungrouped());
		let level = alter(&ddl, "o", vec![fk(&["cid"], "c", &["cid"])]).unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));

		let live = ddl.snapshot();
		let c = ddl.table("test", "c").unwrap();
		let o = ddl.table("test", "o").unwrap();
		let join = live.parent_join(o.id).unwrap().unwrap();
		assert_eq!(join.parent, c.id);
		assert_eq!(join.columns, vec![JoinColumn::new("cid", "cid")]);
		assert_eq!(o.group, c.group);

		let altered = ddl.altered();
		let [DdlEvent::Altered {
			column_changes,
			index_changes,
			..
		}] = altered.as_slice()
		else {
			panic!("expected one alteration");
		};
		assert!(column_changes.is_empty());
		assert!(index_changes.is_empty());
	}

	#[test]
	fn test_drop_grouping_fk_from_leaf() {
		let ddl = MemoryDdl::new(three_table_group());
		let level = alter(&ddl, "i", vec![drop_fk()]).unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));

		let c = ddl.table("test", "c").unwrap();
		let o = ddl.table("test", "o").unwrap();
		let i = ddl.table("test", "i").unwrap();
		assert_ne!(i.group, c.group);
		assert_eq!(o.group, c.group);
		assert!(i.is_root());
	}

	#[test]
	fn test_parent_primary_key_used_without_column_list() {
		let catalog = CatalogBuilder::new("test")
			.table("c")
			.column("id", Type::BigInt)
			.pk(["id"])
			.table("a")
			.column("id", Type::BigInt)
			.column("other_id", Type::BigInt)
			.pk(["id"])
			.build()
			.unwrap();
		let ddl = MemoryDdl::new(catalog);

		alter(&ddl, "a", vec![fk(&["other_id"], "c", &[])]).unwrap();
		let a = ddl.table("test", "a").unwrap();
		let join = ddl.snapshot().parent_join(a.id).unwrap().unwrap().clone();
		assert_eq!(join.parent, ddl.table("test", "c").unwrap().id);
		assert_eq!(join.columns, vec![JoinColumn::new("id", "other_id")]);
	}

	#[test]
	fn test_mismatched_arity() {
		let catalog = CatalogBuilder::new("test")
			.table("c")
			.column("id", Type::BigInt)
			.column("id2", Type::BigInt)
			.pk(["id", "id2"])
			.table("a")
			.column("id", Type::BigInt)
			.column("other_id", Type::BigInt)
			.column("other_id2", Type::BigInt)
			.pk(["id"])
			.build()
			.unwrap();
		let ddl = MemoryDdl::new(catalog);

		let err = alter(&ddl, "a", vec![fk(&["other_id"], "c", &[])]).unwrap_err();
		assert_eq!(err.code, code::JOIN_COLUMN_MISMATCH);
		assert!(ddl.altered().is_empty());
	}

	#[test]
	fn test_drop_from_single_table_group() {
		let ddl = MemoryDdl::new(ungrouped());
		let err = alter(&ddl, "c", vec![drop_fk()]).unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_GROUPING_FK);
	}

	#[test]
	fn test_missing_parent_column() {
		let ddl = MemoryDdl::new(ungrouped());
		let err = alter(&ddl, "o", vec![fk(&["cid"], "c", &["nope"])]).unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_COLUMN);
	}

	#[test]
	fn test_drop_and_add_in_one_statement() {
		let ddl = MemoryDdl::new(three_table_group());
		let before = ddl.snapshot();
		let err = alter(&ddl, "i", vec![drop_fk(), fk(&["iid"], "c", &["cid"])]).unwrap_err();
		assert_eq!(err.code, code::JOIN_TO_MULTIPLE_PARENTS);
		assert_eq!(*ddl.snapshot(), *before);
	}

	/// `c <- o <- i` with a standalone `x(xid PK, oid)` next to it
	fn group_and_standalone() -> Catalog {
		let mut catalog = three_table_group();
		let x = catalog.add_table(TableName::new("test", "x")).unwrap();
		catalog.add_column(x, ColumnDef::new("xid", Type::BigInt)).unwrap();
		catalog.add_column(x, ColumnDef::new("oid", Type::BigInt)).unwrap();
		catalog.add_index(x, IndexDef::primary(["xid"])).unwrap();
		catalog.regroup();
		catalog
	}

	#[test]
	fn test_parent_in_middle_of_group() {
		let ddl = MemoryDdl::new(group_and_standalone());
		alter(&ddl, "x", vec![fk(&["oid"], "o", &["oid"])]).unwrap();

		let live = ddl.snapshot();
		let c = ddl.table("test", "c").unwrap();
		let o = ddl.table("test", "o").unwrap();
		let i = ddl.table("test", "i").unwrap();
		let x = ddl.table("test", "x").unwrap();
		assert_eq!(live.parent_join(x.id).unwrap().unwrap().parent, o.id);
		assert_eq!(live.parent_join(i.id).unwrap().unwrap().parent, o.id);
		assert_eq!(live.parent_join(o.id).unwrap().unwrap().parent, c.id);
		assert_eq!(x.group, c.group);
		assert_eq!(live.root_of(x.id).unwrap(), c.id);
		live.validate().unwrap();
	}

	#[test]
	fn test_parent_is_leaf_of_group() {
		let ddl = MemoryDdl::new(group_and_standalone());
		alter(&ddl, "x", vec![fk(&["oid"], "i", &["iid"])]).unwrap();

		let live = ddl.snapshot();
		let c = ddl.table("test", "c").unwrap();
		let i = ddl.table("test", "i").unwrap();
		let x = ddl.table("test", "x").unwrap();
		assert_eq!(live.parent_join(x.id).unwrap().unwrap().parent, i.id);
		assert_eq!(x.group, c.group);
		assert_eq!(live.subtree(c.id).len(), 4);
		live.validate().unwrap();
	}

	#[test]
	fn test_group_across_schemas() {
		let catalog = CatalogBuilder::new("test")
			.table("c")
			.column("cid", Type::BigInt)
			.not_null()
			.pk(["cid"])
			.table_in("other", "a")
			.column("aid", Type::BigInt)
			.column("cid", Type::BigInt)
			.pk(["aid"])
			.build()
			.unwrap();
		let ddl = MemoryDdl::new(catalog);
		let engine = AlterTableDdl::default();
		let ctx = ExecutionContext::new();
		init_tracing();

		let add = AstAlterTable::elements(
			QualifiedName::qualified("other", "a"),
			vec![AstTableElement::AddForeignKey(AstForeignKey::grouping(
				["cid"],
				QualifiedName::qualified("test", "c"),
				["cid"],
			))],
		);
		engine.alter_table(&ddl, &ddl, &Session::default(), "test", &add, &ctx).unwrap();
		let c = ddl.table("test", "c").unwrap();
		let a = ddl.table("other", "a").unwrap();
		assert_eq!(ddl.snapshot().parent_join(a.id).unwrap().unwrap().parent, c.id);
		assert_eq!(a.group, c.group);

		let drop = AstAlterTable::elements(QualifiedName::qualified("other", "a"), vec![drop_fk()]);
		engine.alter_table(&ddl, &ddl, &Session::default(), "test", &drop, &ctx).unwrap();
		let a = ddl.table("other", "a").unwrap();
		assert!(a.is_root());
		assert_ne!(a.group, ddl.table("test", "c").unwrap().group);
		ddl.snapshot().validate().unwrap();
	}

	#[test]
	fn test_alter_group_round_trip() {
		let ddl = MemoryDdl::new(ungrouped());
		let engine = AlterTableDdl::default();
		let ctx = ExecutionContext::new();

		let add = AstAlterGroup::AddTable {
			child: QualifiedName::new("o"),
			columns: vec!["cid".into()],
			parent: QualifiedName::new("c"),
			parent_columns: vec![],
		};
		assert_eq!(engine.alter_group(&ddl, &Session::default(), "test", &add, &ctx).unwrap(), ChangeLevel::Table);
		assert!(!ddl.table("test", "o").unwrap().is_root());

		let drop = AstAlterGroup::DropTable {
			table: QualifiedName::new("o"),
		};
		engine.alter_group(&ddl, &Session::default(), "test", &drop, &ctx).unwrap();
		let o = ddl.table("test", "o").unwrap();
		assert!(o.is_root());
		assert_ne!(o.group, ddl.table("test", "c").unwrap().group);
	}
}

mod columns {
	use super::*;

	#[test]
	fn test_positions_stay_dense() {
		let ddl = MemoryDdl::new(three_table_group());
		alter(
			&ddl,
			"o",
			vec![drop_column("note"), AstTableElement::AddColumn(AstColumnDefinition::new("placed", Type::DateTime))],
		)
		.unwrap();

		let o = ddl.table("test", "o").unwrap();
		let columns: Vec<_> = o.columns.iter().map(|c| (c.name.as_str(), c.position)).collect();
		assert_eq!(columns, vec![("oid", 0), ("cid", 1), ("qty", 2), ("placed", 3)]);
		ddl.snapshot().validate().unwrap();
	}

	#[test]
	fn test_dropped_index_columns_are_recorded() {
		let ddl = MemoryDdl::new(three_table_group());
		alter(&ddl, "o", vec![drop_column("note")]).unwrap();

		let altered = ddl.altered();
		let [DdlEvent::Altered {
			level,
			index_changes,
			..
		}] = altered.as_slice()
		else {
			panic!("expected one alteration");
		};
		assert_eq!(*level, ChangeLevel::Table);
		assert_eq!(
			*index_changes,
			vec![TableChange::drop("by_note"), TableChange::modify("by_cid_note", "by_cid_note")]
		);

		let o = ddl.table("test", "o").unwrap();
		assert!(o.index("by_note").is_none());
		assert_eq!(o.index("by_cid_note").unwrap().column_names().collect::<Vec<_>>(), vec!["cid"]);
	}

	#[test]
	fn test_rename_only_is_metadata() {
		let ddl = MemoryDdl::new(three_table_group());
		let level = alter(
			&ddl,
			"o",
			vec![AstTableElement::RenameColumn {
				name: "oid".into(),
				new_name: "order_id".into(),
			}],
		)
		.unwrap();
		assert_eq!(level, Some(ChangeLevel::Metadata));

		let live = ddl.snapshot();
		let o = ddl.table("test", "o").unwrap();
		let i = ddl.table("test", "i").unwrap();
		assert_eq!(o.primary_key().unwrap().column_names().collect::<Vec<_>>(), vec!["order_id"]);
		assert_eq!(live.parent_join(i.id).unwrap().unwrap().columns, vec![JoinColumn::new("order_id", "oid")]);
		assert_eq!(i.group, o.group);
	}

	#[test]
	fn test_drop_missing_column() {
		let ddl = MemoryDdl::new(three_table_group());
		let err = alter(&ddl, "o", vec![drop_column("nope")]).unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_COLUMN);
	}

	#[test]
	fn test_type_change_reevaluates_default() {
		let ddl = MemoryDdl::new(three_table_group());
		let ctx = ExecutionContext::new();
		let level = alter_with(
			&ddl,
			"o",
			vec![AstTableElement::ModifyColumn {
				name: "qty".into(),
				modification: AstColumnModification::Type(Type::TinyInt.into()),
			}],
			&ctx,
		)
		.unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));

		let qty = ddl.table("test", "o").unwrap().column("qty").unwrap().clone();
		assert_eq!(qty.descriptor.ty, Type::TinyInt);
		assert_eq!(qty.default, Some(sqlayer_catalog::ColumnDefault::Literal("127".into())));

		let notices = ctx.take_notices();
		assert_eq!(notices.len(), 1);
		assert_eq!(notices[0].original, "300");
		assert_eq!(notices[0].truncated, "127");
	}

	#[test]
	fn test_identity_lifecycle() {
		let ddl = MemoryDdl::new(ungrouped());
		let identity = |change| AstTableElement::ModifyColumn {
			name: "cid".into(),
			modification: AstColumnModification::Identity(change),
		};

		alter(
			&ddl,
			"c",
			vec![identity(AstIdentityChange::Create(AstIdentity {
				start: 1,
				increment: 1,
			}))],
		)
		.unwrap();
		let sequence = ddl.table("test", "c").unwrap().column("cid").unwrap().identity.unwrap();
		assert_eq!(ddl.snapshot().sequence(sequence).unwrap().name, "c_cid_seq");

		alter(&ddl, "c", vec![identity(AstIdentityChange::SetIncrement(5))]).unwrap();
		let live = ddl.snapshot();
		let sequence = ddl.table("test", "c").unwrap().column("cid").unwrap().identity.unwrap();
		assert_eq!(live.sequence(sequence).unwrap().increment, 5);
		assert_eq!(live.sequences().count(), 1);

		let err = alter(
			&ddl,
			"o",
			vec![AstTableElement::ModifyColumn {
				name: "cid".into(),
				modification: AstColumnModification::Identity(AstIdentityChange::SetIncrement(2)),
			}],
		)
		.unwrap_err();
		assert_eq!(err.code, code::COLUMN_NOT_GENERATED);
	}
}

mod indexes {
	use super::*;

	#[test]
	fn test_drop_unknown_unique() {
		let ddl = MemoryDdl::new(three_table_group());
		let err = alter(&ddl, "o", vec![AstTableElement::DropConstraint(AstDropConstraint::Unique("nope".into()))])
			.unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_UNIQUE);
	}

	#[test]
	fn test_drop_plain_index_as_unique() {
		let ddl = MemoryDdl::new(three_table_group());
		let err = alter(&ddl, "o", vec![AstTableElement::DropConstraint(AstDropConstraint::Unique("by_note".into()))])
			.unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_UNIQUE);
	}

	#[test]
	fn test_drop_missing_primary_key() {
		let catalog = CatalogBuilder::new("test").table("t").column("a", Type::Int).build().unwrap();
		let ddl = MemoryDdl::new(catalog);
		let err = alter(&ddl, "t", vec![AstTableElement::DropConstraint(AstDropConstraint::PrimaryKey)]).unwrap_err();
		assert_eq!(err.code, code::NO_SUCH_INDEX);
	}

	#[test]
	fn test_add_unique_is_index_level() {
		let ddl = MemoryDdl::new(three_table_group());
		let level = alter(
			&ddl,
			"c",
			vec![AstTableElement::AddConstraint(AstConstraint {
				name: None,
				kind: AstConstraintKind::Unique(vec!["name".into()]),
			})],
		)
		.unwrap();
		assert_eq!(level, Some(ChangeLevel::Index));
		assert!(ddl.table("test", "c").unwrap().index("name").unwrap().unique);
	}

	#[test]
	fn test_drop_primary_key_is_table_level() {
		let ddl = MemoryDdl::new(ungrouped());
		let level = alter(&ddl, "o", vec![AstTableElement::DropConstraint(AstDropConstraint::PrimaryKey)]).unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));
		assert!(ddl.table("test", "o").unwrap().index(PRIMARY).is_none());
	}
}

mod fast_path {
	use super::*;

	#[test]
	fn test_rename_table() {
		let ddl = MemoryDdl::new(three_table_group());
		let id = ddl.table("test", "o").unwrap().id;
		let level = alter(
			&ddl,
			"o",
			vec![AstTableElement::RenameTable {
				new_name: QualifiedName::new("orders"),
			}],
		)
		.unwrap();
		assert_eq!(level, Some(ChangeLevel::Metadata));
		assert_eq!(ddl.table("test", "orders").unwrap().id, id);
		assert!(ddl.altered().is_empty());
	}

	#[test]
	fn test_update_statistics_for_all_indexes() {
		let ddl = MemoryDdl::new(three_table_group());
		let ast = AstAlterTable {
			table: QualifiedName::new("o"),
			operation: AstAlterTableOperation::UpdateStatistics {
				index: None,
			},
		};
		let level = AlterTableDdl::default()
			.alter_table(&ddl, &ddl, &Session::default(), "test", &ast, &ExecutionContext::new())
			.unwrap();
		assert_eq!(level, None);
		assert_eq!(
			ddl.events(),
			vec![DdlEvent::Statistics {
				table: TableName::new("test", "o"),
				indexes: None,
			}]
		);
	}

	#[test]
	fn test_truncate() {
		let ddl = MemoryDdl::new(three_table_group());
		let o = ddl.table("test", "o").unwrap().id;
		ddl.rows().insert(o, vec![0; 4]);
		let ast = AstAlterTable {
			table: QualifiedName::new("o"),
			operation: AstAlterTableOperation::Truncate {
				cascade: false,
			},
		};
		AlterTableDdl::default()
			.alter_table(&ddl, &ddl, &Session::default(), "test", &ast, &ExecutionContext::new())
			.unwrap();
		assert_eq!(ddl.rows().count(o), 0);
	}

	#[test]
	fn test_unsupported_element() {
		let ddl = MemoryDdl::new(three_table_group());
		let err = alter(&ddl, "o", vec![AstTableElement::Other("SET TABLESPACE fast".into())]).unwrap_err();
		assert_eq!(err.code, code::UNSUPPORTED_SQL);
		assert!(ddl.events().is_empty());
	}
}

#[test]
fn test_cancelled_statement_changes_nothing() {
	let ddl = MemoryDdl::new(three_table_group());
	let before = ddl.snapshot();
	let ctx = ExecutionContext::new();
	ctx.cancel();

	let err = alter_with(&ddl, "o", vec![drop_column("note")], &ctx).unwrap_err();
	assert_eq!(err.code, code::QUERY_CANCELLED);
	assert_eq!(*ddl.snapshot(), *before);
}

mod copy_and_swap {
	use super::*;

	fn ddl() -> MemoryDdl {
		MemoryDdl::with_config(three_table_group(), AlterBuilder::new().rewrite(RewriteStrategy::CopyAndSwap).build())
	}

	#[test]
	fn test_swaps_in_replacement() {
		let ddl = ddl();
		let old = ddl.table("test", "c").unwrap().id;
		ddl.rows().insert(old, vec![1, 2, 3]);

		let level = alter(&ddl, "c", vec![drop_column("name")]).unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));

		let events = ddl.events();
		assert_eq!(
			events[..4],
			[
				DdlEvent::Created(TableName::new("test", "__TEMP_NEW")),
				DdlEvent::Renamed {
					from: TableName::new("test", "c"),
					to: TableName::new("test", "__TEMP_OLD"),
				},
				DdlEvent::Renamed {
					from: TableName::new("test", "__TEMP_NEW"),
					to: TableName::new("test", "c"),
				},
				DdlEvent::Dropped(TableName::new("test", "__TEMP_OLD")),
			]
		);
		assert!(matches!(events[4], DdlEvent::Altered { .. }));

		let live = ddl.snapshot();
		let c = ddl.table("test", "c").unwrap();
		let o = ddl.table("test", "o").unwrap();
		assert_ne!(c.id, old);
		assert_eq!(c.columns.len(), 1);
		assert_eq!(live.parent_join(o.id).unwrap().unwrap().parent, c.id);
		assert_eq!(o.group, c.group);
		assert_eq!(live.group(c.group.unwrap()).unwrap().name, "c");
		assert_eq!(ddl.rows().count(c.id), 1);
		assert_eq!(ddl.rows().count(old), 0);
		live.validate().unwrap();
	}

	#[test]
	fn test_metadata_change_stays_in_place() {
		let ddl = ddl();
		let id = ddl.table("test", "c").unwrap().id;
		alter(
			&ddl,
			"c",
			vec![AstTableElement::RenameColumn {
				name: "name".into(),
				new_name: "title".into(),
			}],
		)
		.unwrap();
		assert_eq!(ddl.table("test", "c").unwrap().id, id);
		assert_eq!(ddl.events().len(), 1);
	}

	#[test]
	fn test_middle_table_keeps_children() {
		let ddl = ddl();
		let old = ddl.table("test", "o").unwrap().id;

		let level = alter(
			&ddl,
			"o",
			vec![AstTableElement::AddColumn(AstColumnDefinition::new("placed", Type::DateTime))],
		)
		.unwrap();
		assert_eq!(level, Some(ChangeLevel::Table));

		let live = ddl.snapshot();
		let c = ddl.table("test", "c").unwrap();
		let o = ddl.table("test", "o").unwrap();
		let i = ddl.table("test", "i").unwrap();
		assert_ne!(o.id, old);
		assert_eq!(live.parent_join(o.id).unwrap().unwrap().parent, c.id);
		let join = live.parent_join(i.id).unwrap().unwrap();
		assert_eq!(join.parent, o.id);
		assert_eq!(join.columns, vec![JoinColumn::new("oid", "oid")]);
		assert_eq!(o.group, c.group);
		assert_eq!(i.group, c.group);
		live.validate().unwrap();
	}

	#[test]
	fn test_join_column_type_change_rejected() {
		let ddl = ddl();
		let before = ddl.snapshot();

		let err = alter(
			&ddl,
			"o",
			vec![AstTableElement::ModifyColumn {
				name: "cid".into(),
				modification: AstColumnModification::Type(TypeDescriptor::varchar(8)),
			}],
		)
		.unwrap_err();
		assert_eq!(err.code, code::JOIN_COLUMN_MISMATCH);
		assert!(ddl.events().is_empty());
		assert_eq!(*ddl.snapshot(), *before);
	}

	#[test]
	fn test_unadoptable_join_leaves_table_in_place() {
		init_tracing();
		let ddl = ddl();
		let live = ddl.snapshot();
		let o = ddl.table("test", "o").unwrap();

		let mut staged = live.clone_selected(&GroupSelector::for_table(&live, o.id).unwrap());
		staged.column_mut(o.id, "cid").unwrap().descriptor = TypeDescriptor::varchar(8);
		let target = StagedTable::new(staged, o.id);

		let err = ddl
			.alter_table(&Session::default(), &o.name, target, &[], &[], &ExecutionContext::new())
			.unwrap_err();
		assert_eq!(err.code, code::JOIN_COLUMN_MISMATCH);
		assert!(ddl.events().is_empty());
		assert_eq!(*ddl.snapshot(), *live);
		let after = ddl.table("test", "o").unwrap();
		assert_eq!(after.id, o.id);
		assert!(!after.is_root());
	}

	struct FailingCopier;

	impl TableCopier for FailingCopier {
		fn copy_table(&self, _session: &Session, _source: &TableName, _destination: &TableName) -> sqlayer_type::Result<()> {
			err!(sqlayer_type::diagnostic::row::invalid_row("copy interrupted"))
		}
	}

	#[test]
	fn test_failed_copy_rolls_back() {
		let ddl = ddl().with_copier(FailingCopier);
		let before = ddl.table("test", "c").unwrap();

		let err = alter(&ddl, "c", vec![drop_column("name")]).unwrap_err();
		assert_eq!(err.code, code::INVALID_ROW);

		assert_eq!(ddl.table("test", "c").unwrap(), before);
		assert!(ddl.table("test", "__TEMP_NEW").is_err());
		assert_eq!(
			ddl.events(),
			vec![
				DdlEvent::Created(TableName::new("test", "__TEMP_NEW")),
				DdlEvent::Dropped(TableName::new("test", "__TEMP_NEW")),
			]
		);
	}
}
