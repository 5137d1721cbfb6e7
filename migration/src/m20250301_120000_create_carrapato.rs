use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let statement = r#"
        create table "carrapato" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "codigo_serial" varchar(100) not null,
            "status_bateria" varchar(20) not null default 'Alta',
            "status_de_uso" varchar(20) not null default 'Disponivel',
            "id_patio" int not null,
            "latitude" double precision null,
            "longitude" double precision null
        );

        alter table
            "carrapato"
        add
            constraint "carrapato_codigo_serial_unique" unique ("codigo_serial");

        alter table
            "carrapato"
        add
            constraint "carrapato_id_patio_positive" check ("id_patio" > 0);

        alter table
            "carrapato"
        add
            constraint "carrapato_location_complete" check (("latitude" is null) = ("longitude" is null));
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(r#"drop table "carrapato";"#)
            .await?;

        Ok(())
    }
}
