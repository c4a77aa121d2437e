use pretty_assertions::assert_eq;
use recipe_share::{Caller, Db, Difficulty, RecipeId, RecipeInput, UserId};
use recipe_share_driver_memory::Memory;
use tests::{assert_err, assert_ok, recipe, DbTest};

fn input(title: &str) -> RecipeInput {
    RecipeInput {
        title: title.to_string(),
        ingredients: "김치 1컵\n돼지고기 200g".to_string(),
        instructions: "1. 볶습니다\n2. 끓입니다".to_string(),
        cooking_time: Some(25),
        difficulty: Some("보통".to_string()),
        category: Some("한식".to_string()),
    }
}

#[tokio::test]
async fn create_then_list_with_author() {
    let test = DbTest::new(Memory::new());
    let db = test.db();
    let caller = Caller::new(UserId::generate()).with_email("chef@example.com");

    assert_ok!(db.get_or_create_profile(&caller).await);
    let created = assert_ok!(db.create_recipe(&caller.id, input(" 김치찌개 ")).await);

    assert_eq!(created.title, "김치찌개");
    assert_eq!(created.user_id, Some(caller.id));
    assert_eq!(created.difficulty, Some(Difficulty::Normal));

    let dashboard = assert_ok!(db.dashboard(None).await);
    assert_eq!(dashboard.len(), 1);
    assert_eq!(dashboard[0].recipe, created);

    let card = dashboard[0].card();
    assert_eq!(card.author, "chef");
    assert_eq!(card.time, "25분");
    assert_eq!(card.icon, "🍚");
}

#[tokio::test]
async fn invalid_input_writes_nothing() {
    let mut test = DbTest::new(Memory::new());
    let owner = UserId::generate();

    let err = assert_err!(test.db().create_recipe(&owner, input("   ")).await);
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "title is required");

    let err = assert_err!(
        test.db()
            .create_recipe(
                &owner,
                RecipeInput {
                    cooking_time: Some(-5),
                    ..input("라면")
                }
            )
            .await
    );
    assert!(err.is_validation());

    assert!(test.log().is_empty());
    assert_eq!(test.store().recipe_count(), 0);
}

#[tokio::test]
async fn dashboard_uses_configured_page_size() {
    let db = Db::builder().page_size(2).build(Memory::new());
    let owner = UserId::generate();

    for title in ["하나", "둘", "셋"] {
        assert_ok!(db.create_recipe(&owner, input(title)).await);
    }

    assert_eq!(assert_ok!(db.dashboard(None).await).len(), 2);
    assert_eq!(assert_ok!(db.dashboard(Some(10)).await).len(), 3);
}

#[tokio::test]
async fn dashboard_is_newest_first() {
    let test = DbTest::new(Memory::new());
    let owner = Some(UserId::generate());
    for (title, minute) in [("old", 0), ("new", 10), ("mid", 5)] {
        test.store().seed_recipe(recipe(owner, title, minute));
    }

    let titles: Vec<_> = assert_ok!(test.db().dashboard(None).await)
        .into_iter()
        .map(|r| r.recipe.title)
        .collect();

    assert_eq!(titles, ["new", "mid", "old"]);
}

#[tokio::test]
async fn owner_updates_recipe() {
    let test = DbTest::new(Memory::new());
    let db = test.db();
    let owner = UserId::generate();
    let created = assert_ok!(db.create_recipe(&owner, input("떡볶이")).await);

    let updated = assert_ok!(
        db.update_recipe(
            &owner,
            created.id,
            RecipeInput {
                cooking_time: None,
                difficulty: Some("어려움".to_string()),
                ..input("로제 떡볶이")
            }
        )
        .await
    );

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "로제 떡볶이");
    assert_eq!(updated.cooking_time, None);
    assert_eq!(updated.difficulty, Some(Difficulty::Hard));

    let detail = assert_ok!(db.recipe_detail(created.id).await);
    assert_eq!(detail.recipe, updated);
}

#[tokio::test]
async fn only_owner_may_edit() {
    let mut test = DbTest::new(Memory::new());
    let owner = UserId::generate();
    let intruder = UserId::generate();
    let created = assert_ok!(test.db().create_recipe(&owner, input("갈비찜")).await);
    test.log().clear();

    let err = assert_err!(test.db().recipe_for_edit(&intruder, created.id).await);
    assert!(err.is_forbidden());

    let err = assert_err!(
        test.db()
            .update_recipe(&intruder, created.id, input("내 갈비찜"))
            .await
    );
    assert!(err.is_forbidden());
    assert_eq!(test.log().writes(), 0);

    let err = assert_err!(test.db().recipe_for_edit(&owner, RecipeId::generate()).await);
    assert!(err.is_record_not_found());
}

#[tokio::test]
async fn delete_is_owner_scoped() {
    let test = DbTest::new(Memory::new());
    let db = test.db();
    let owner = UserId::generate();
    let created = assert_ok!(db.create_recipe(&owner, input("수제비")).await);

    let err = assert_err!(db.delete_recipe(&UserId::generate(), created.id).await);
    assert!(err.is_record_not_found());
    assert_eq!(test.store().recipe_count(), 1);

    assert_ok!(db.delete_recipe(&owner, created.id).await);
    assert_eq!(test.store().recipe_count(), 0);

    let err = assert_err!(db.recipe_detail(created.id).await);
    assert!(err.is_record_not_found());

    // Deleting twice
    let err = assert_err!(db.delete_recipe(&owner, created.id).await);
    assert!(err.is_record_not_found());
}
