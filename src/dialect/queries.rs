//! SQL text for each dialect. Every variable part is a bind parameter.

use super::Dialect;
use crate::schema::{CatalogQuery, FilterPolicy};

pub(super) fn mysql_tables(_d: &Dialect, schema: Option<&str>, _filter: &FilterPolicy) -> CatalogQuery {
    let base = "SELECT TABLE_NAME AS NAME, TABLE_COMMENT AS COMMENT \
                FROM information_schema.TABLES";
    match schema {
        Some(schema) => CatalogQuery::new(format!(
            "{base} WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME"
        ))
        .bind(schema),
        None => CatalogQuery::new(format!(
            "{base} WHERE TABLE_SCHEMA = DATABASE() ORDER BY TABLE_NAME"
        )),
    }
}

pub(super) fn mysql_columns(_d: &Dialect, schema: Option<&str>, table: &str) -> CatalogQuery {
    let base = "SELECT COLUMN_NAME AS FIELD, COLUMN_TYPE AS TYPE, COLUMN_COMMENT AS COMMENT, \
                COLUMN_KEY AS `KEY`, EXTRA AS EXTRA \
                FROM information_schema.COLUMNS";
    match schema {
        Some(schema) => CatalogQuery::new(format!(
            "{base} WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION"
        ))
        .bind(schema)
        .bind(table),
        None => CatalogQuery::new(format!(
            "{base} WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION"
        ))
        .bind(table),
    }
}

/// Oracle catalogs can be very large, so include/exclude lists are applied in
/// the query itself. Oracle stores unquoted identifiers upper-cased.
pub(super) fn oracle_tables(d: &Dialect, _schema: Option<&str>, filter: &FilterPolicy) -> CatalogQuery {
    let mut sql = String::from(
        "SELECT A.TABLE_NAME, B.COMMENTS FROM USER_TABLES A \
         LEFT JOIN USER_TAB_COMMENTS B ON A.TABLE_NAME = B.TABLE_NAME",
    );
    let (operator, names) = match filter {
        FilterPolicy::Include(names) => ("IN", names),
        FilterPolicy::Exclude(names) => ("NOT IN", names),
        FilterPolicy::All => return CatalogQuery::new(sql),
    };
    sql.push_str(&format!(
        " WHERE A.TABLE_NAME {operator} ({})",
        d.placeholder.list(1, names.len())
    ));
    names
        .iter()
        .fold(CatalogQuery::new(sql), |q, name| q.bind(name.to_uppercase()))
}

pub(super) fn oracle_columns(_d: &Dialect, _schema: Option<&str>, table: &str) -> CatalogQuery {
    CatalogQuery::new(
        "SELECT A.COLUMN_NAME, \
           CASE WHEN A.DATA_TYPE = 'NUMBER' THEN \
             (CASE WHEN A.DATA_PRECISION IS NULL THEN A.DATA_TYPE \
                   WHEN NVL(A.DATA_SCALE, 0) > 0 \
                     THEN A.DATA_TYPE || '(' || A.DATA_PRECISION || ',' || A.DATA_SCALE || ')' \
                   ELSE A.DATA_TYPE || '(' || A.DATA_PRECISION || ')' END) \
           ELSE A.DATA_TYPE END DATA_TYPE, \
           B.COMMENTS, \
           DECODE(C.POSITION, 1, 'PRI') KEY \
         FROM USER_TAB_COLUMNS A \
         LEFT JOIN USER_COL_COMMENTS B \
           ON A.TABLE_NAME = B.TABLE_NAME AND A.COLUMN_NAME = B.COLUMN_NAME \
         LEFT JOIN (SELECT CC.TABLE_NAME, CC.COLUMN_NAME, CC.POSITION \
                      FROM USER_CONSTRAINTS UC \
                      JOIN USER_CONS_COLUMNS CC ON UC.CONSTRAINT_NAME = CC.CONSTRAINT_NAME \
                     WHERE UC.CONSTRAINT_TYPE = 'P') C \
           ON A.TABLE_NAME = C.TABLE_NAME AND A.COLUMN_NAME = C.COLUMN_NAME \
         WHERE A.TABLE_NAME = :1 \
         ORDER BY A.COLUMN_ID",
    )
    .bind(table)
}

pub(super) fn sqlserver_tables(_d: &Dialect, _schema: Option<&str>, _filter: &FilterPolicy) -> CatalogQuery {
    CatalogQuery::new(
        "SELECT CAST(so.name AS VARCHAR(500)) AS TABLE_NAME, \
                CAST(sep.value AS VARCHAR(500)) AS COMMENTS \
         FROM sysobjects so \
         LEFT JOIN sys.extended_properties sep ON sep.major_id = so.id AND sep.minor_id = 0 \
         WHERE so.xtype = 'U' \
         ORDER BY so.name",
    )
}

pub(super) fn sqlserver_columns(_d: &Dialect, _schema: Option<&str>, table: &str) -> CatalogQuery {
    CatalogQuery::new(
        "SELECT CAST(b.name AS VARCHAR(500)) AS COLUMN_NAME, \
                CAST(t.name AS VARCHAR(500)) AS DATA_TYPE, \
                CAST(ep.value AS VARCHAR(500)) AS COMMENTS, \
                CASE WHEN pk.column_id IS NULL THEN '' ELSE 'PRI' END AS [KEY], \
                CAST(b.is_identity AS INT) AS isIdentity \
         FROM sys.tables a \
         JOIN sys.columns b ON b.object_id = a.object_id \
         JOIN sys.types t ON t.user_type_id = b.user_type_id \
         LEFT JOIN sys.extended_properties ep \
           ON ep.major_id = b.object_id AND ep.minor_id = b.column_id \
         LEFT JOIN (SELECT ic.object_id, ic.column_id \
                      FROM sys.indexes i \
                      JOIN sys.index_columns ic \
                        ON ic.object_id = i.object_id AND ic.index_id = i.index_id \
                     WHERE i.is_primary_key = 1) pk \
           ON pk.object_id = b.object_id AND pk.column_id = b.column_id \
         WHERE a.name = @P1 \
         ORDER BY b.column_id",
    )
    .bind(table)
}

pub(super) fn postgres_tables(_d: &Dialect, schema: Option<&str>, _filter: &FilterPolicy) -> CatalogQuery {
    CatalogQuery::new(
        "SELECT A.tablename::text AS tablename, \
                obj_description(B.oid, 'pg_class') AS comments \
         FROM pg_tables A \
         JOIN pg_namespace N ON N.nspname = A.schemaname \
         JOIN pg_class B ON B.relname = A.tablename AND B.relnamespace = N.oid \
         WHERE A.schemaname::text = $1 \
         ORDER BY A.tablename",
    )
    .bind(schema.unwrap_or("public"))
}

pub(super) fn postgres_columns(_d: &Dialect, schema: Option<&str>, table: &str) -> CatalogQuery {
    CatalogQuery::new(
        "SELECT A.attname::text AS name, \
                format_type(A.atttypid, A.atttypmod) AS type, \
                col_description(A.attrelid, A.attnum) AS comment, \
                CASE WHEN C.contype = 'p' THEN 'PRI' ELSE '' END AS key \
         FROM pg_attribute A \
         JOIN pg_class B ON B.oid = A.attrelid \
         JOIN pg_namespace N ON N.oid = B.relnamespace \
         LEFT JOIN pg_constraint C \
           ON C.conrelid = A.attrelid AND C.contype = 'p' AND A.attnum = ANY(C.conkey) \
         WHERE N.nspname::text = $1 AND B.relname::text = $2 \
           AND A.attnum > 0 AND NOT A.attisdropped \
         ORDER BY A.attnum",
    )
    .bind(schema.unwrap_or("public"))
    .bind(table)
}
