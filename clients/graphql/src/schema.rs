use database::{
    database::{
        request_manager::{RequestManager, RequestManagerError},
        resolver::ApplyErrors,
        table::filter::PhoneFilter,
    },
    model::person::{self, NewPerson, Person},
};
use juniper::{
    graphql_value, EmptySubscription, FieldError, FieldResult, GraphQLEnum, GraphQLObject, Object,
    RootNode, Value, ID,
};

pub struct GraphQLContext {
    pub request_manager: RequestManager,
}

// https://graphql-rust.github.io/juniper/master/types/objects/using_contexts.html
impl juniper::Context for GraphQLContext {}

#[derive(GraphQLEnum, Clone, Copy, Debug, PartialEq)]
#[graphql(name = "YesNo")]
pub enum YesNo {
    #[graphql(name = "Yes")]
    Yes,
    #[graphql(name = "No")]
    No,
}

impl From<YesNo> for PhoneFilter {
    fn from(value: YesNo) -> Self {
        match value {
            YesNo::Yes => PhoneFilter::Yes,
            YesNo::No => PhoneFilter::No,
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(description = "Where a person lives, derived from the person's street and city")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
}

impl Address {
    pub fn from_address(address: person::Address) -> Address {
        Address {
            street: address.street,
            city: address.city,
        }
    }
}

/// Serialized view of a person, the address is computed when it is requested
pub struct PersonObject(Person);

#[juniper::graphql_object(name = "Person", context = GraphQLContext)]
impl PersonObject {
    fn name(&self) -> String {
        self.0.name.clone()
    }

    fn age(&self) -> Option<i32> {
        self.0.age
    }

    fn address(&self) -> Option<Address> {
        Some(Address::from_address(self.0.address()))
    }

    fn id(&self) -> Option<ID> {
        self.0.id.as_ref().map(|id| ID::from(id.to_string()))
    }

    fn phone(&self) -> Option<String> {
        self.0.phone.clone()
    }
}

/// Duplicate names are reported like any other invalid user input, with the offending name attached
fn to_field_error(err: RequestManagerError) -> FieldError {
    match err {
        RequestManagerError::Rejected(ApplyErrors::DuplicatePerson(name)) => {
            let mut extensions = Object::with_capacity(2);
            extensions.add_field("code", Value::scalar("BAD_USER_INPUT".to_string()));
            extensions.add_field("invalidArgs", Value::scalar(name));

            FieldError::new("Person already exists", Value::object(extensions))
        }
        err => FieldError::new(err, graphql_value!({ "code": "INTERNAL_SERVER_ERROR" })),
    }
}

pub struct QueryRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl QueryRoot {
    fn person_count(context: &GraphQLContext) -> FieldResult<i32> {
        let count = context
            .request_manager
            .send_person_count()
            .map_err(to_field_error)?;

        Ok(i32::try_from(count)?)
    }

    /// Every person, filtered on whether they have a phone when `phone` is set
    fn all_persons(
        phone: Option<YesNo>,
        context: &GraphQLContext,
    ) -> FieldResult<Vec<PersonObject>> {
        let people = context
            .request_manager
            .send_all_persons(phone.map(PhoneFilter::from))
            .map_err(to_field_error)?;

        Ok(people.into_iter().map(PersonObject).collect())
    }

    fn find_person(name: String, context: &GraphQLContext) -> FieldResult<Option<PersonObject>> {
        let person = context
            .request_manager
            .send_find_person(name)
            .map_err(to_field_error)?;

        Ok(person.map(PersonObject))
    }
}

pub struct MutationRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl MutationRoot {
    fn add_person(
        name: String,
        street: Option<String>,
        city: Option<String>,
        age: i32,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let new_person = NewPerson {
            name,
            street,
            city,
            age,
        };

        let person = context
            .request_manager
            .send_add_person(new_person)
            .map_err(to_field_error)?;

        Ok(Some(PersonObject(person)))
    }

    /// Sets the phone of an existing person, null when nobody has that name
    fn edit_person(
        name: String,
        phone: String,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let person = context
            .request_manager
            .send_edit_person(name, phone)
            .map_err(to_field_error)?;

        Ok(person.map(PersonObject))
    }
}

pub type Schema = RootNode<'static, QueryRoot, MutationRoot, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(QueryRoot {}, MutationRoot {}, EmptySubscription::new())
}

#[cfg(test)]
mod tests {
    use database::database::database::{Database, DatabaseOptions};
    use juniper::{execute_sync, ExecutionError, Variables};

    use super::*;

    fn seeded_context() -> GraphQLContext {
        GraphQLContext {
            request_manager: Database::new(DatabaseOptions::default()).run(),
        }
    }

    fn run<'a>(
        schema: &'a Schema,
        context: &GraphQLContext,
        query: &'a str,
    ) -> (Value, Vec<ExecutionError<juniper::DefaultScalarValue>>) {
        execute_sync(query, None, schema, &Variables::new(), context)
            .expect("query should be valid")
    }

    mod queries {
        use super::*;

        #[test]
        fn person_count() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, errors) = run(&schema, &context, "{ personCount }");

            assert_eq!(value, graphql_value!({ "personCount": 5 }));
            assert!(errors.is_empty());
        }

        #[test]
        fn find_person_projects_address() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, errors) = run(
                &schema,
                &context,
                r#"{ findPerson(name: "John") { name age address { street city } id phone } }"#,
            );

            assert_eq!(
                value,
                graphql_value!({
                    "findPerson": {
                        "name": "John",
                        "age": 20,
                        "address": { "street": "Street 1", "city": "City 1" },
                        "id": None,
                        "phone": "12345",
                    }
                })
            );
            assert!(errors.is_empty());
        }

        #[test]
        fn address_without_street_or_city_is_an_object() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, _) = run(
                &schema,
                &context,
                r#"{ findPerson(name: "Jane") { address { street city } } }"#,
            );

            assert_eq!(
                value,
                graphql_value!({
                    "findPerson": { "address": { "street": None, "city": None } }
                })
            );
        }

        #[test]
        fn find_unknown_person_is_null_not_an_error() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, errors) = run(&schema, &context, r#"{ findPerson(name: "john") { name } }"#);

            assert_eq!(value, graphql_value!({ "findPerson": None }));
            assert!(errors.is_empty());
        }

        #[test]
        fn all_persons_filters_on_phone() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, _) = run(&schema, &context, "{ allPersons(phone: Yes) { name } }");
            assert_eq!(
                value,
                graphql_value!({ "allPersons": [{ "name": "John" }] })
            );

            let (value, _) = run(&schema, &context, "{ allPersons(phone: No) { name } }");
            assert_eq!(
                value,
                graphql_value!({
                    "allPersons": [
                        { "name": "Jane" },
                        { "name": "Bob" },
                        { "name": "Mary" },
                        { "name": "Peter" },
                    ]
                })
            );

            let (value, _) = run(&schema, &context, "{ allPersons { name } }");
            assert_eq!(
                value,
                graphql_value!({
                    "allPersons": [
                        { "name": "John" },
                        { "name": "Jane" },
                        { "name": "Bob" },
                        { "name": "Mary" },
                        { "name": "Peter" },
                    ]
                })
            );
        }

        #[test]
        fn unknown_enum_value_is_rejected_by_the_schema() {
            let schema = create_schema();
            let context = seeded_context();

            let result = execute_sync(
                "{ allPersons(phone: Maybe) { name } }",
                None,
                &schema,
                &Variables::new(),
                &context,
            );

            assert!(result.is_err());
        }
    }

    mod mutations {
        use super::*;

        #[test]
        fn add_person_assigns_id() {
            // Given the seed data
            let schema = create_schema();
            let context = seeded_context();

            // When Zoe is added
            let (value, errors) = run(
                &schema,
                &context,
                r#"mutation { addPerson(name: "Zoe", age: 30) { name age id phone address { street city } } }"#,
            );
            assert!(errors.is_empty());

            // Then she is returned with an id, and nothing else set
            let zoe = value
                .as_object_value()
                .and_then(|o| o.get_field_value("addPerson"))
                .and_then(|v| v.as_object_value())
                .expect("should have returned a person");

            assert!(!zoe.get_field_value("id").unwrap().is_null());
            assert_eq!(zoe.get_field_value("name"), Some(&graphql_value!("Zoe")));
            assert_eq!(zoe.get_field_value("age"), Some(&graphql_value!(30)));
            assert_eq!(zoe.get_field_value("phone"), Some(&graphql_value!(None)));
            assert_eq!(
                zoe.get_field_value("address"),
                Some(&graphql_value!({ "street": None, "city": None }))
            );

            // And the count goes up
            let (value, _) = run(&schema, &context, "{ personCount }");
            assert_eq!(value, graphql_value!({ "personCount": 6 }));
        }

        #[test]
        fn adding_existing_name_is_a_user_input_error() {
            // Given the seed data which contains John
            let schema = create_schema();
            let context = seeded_context();

            // When John is added again
            let (value, errors) = run(
                &schema,
                &context,
                r#"mutation { addPerson(name: "John", age: 20, street: "X", city: "Y") { name } }"#,
            );

            // Then the field is null and the error carries the offending name
            assert_eq!(value, graphql_value!({ "addPerson": None }));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].error().message(), "Person already exists");
            assert_eq!(
                errors[0].error().extensions(),
                &graphql_value!({ "code": "BAD_USER_INPUT", "invalidArgs": "John" })
            );

            // And nothing was added
            let (value, _) = run(&schema, &context, "{ personCount }");
            assert_eq!(value, graphql_value!({ "personCount": 5 }));
        }

        #[test]
        fn edit_person_sets_phone() {
            // Given the seed data where Jane has no phone
            let schema = create_schema();
            let context = seeded_context();

            // When her phone is set
            let (value, errors) = run(
                &schema,
                &context,
                r#"mutation { editPerson(name: "Jane", phone: "555") { name age phone id } }"#,
            );

            // Then only the phone changes
            assert_eq!(
                value,
                graphql_value!({
                    "editPerson": { "name": "Jane", "age": 21, "phone": "555", "id": None }
                })
            );
            assert!(errors.is_empty());

            // And she is now listed with the people that have a phone
            let (value, _) = run(&schema, &context, "{ allPersons(phone: Yes) { name } }");
            assert_eq!(
                value,
                graphql_value!({ "allPersons": [{ "name": "John" }, { "name": "Jane" }] })
            );
        }

        #[test]
        fn edit_unknown_person_is_null() {
            let schema = create_schema();
            let context = seeded_context();

            let (value, errors) = run(
                &schema,
                &context,
                r#"mutation { editPerson(name: "Nobody", phone: "555") { name } }"#,
            );

            assert_eq!(value, graphql_value!({ "editPerson": None }));
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn stopped_database_is_an_internal_error() {
        let schema = create_schema();
        let context = seeded_context();

        context
            .request_manager
            .send_shutdown_request()
            .expect("Should not timeout");

        let (_, errors) = run(&schema, &context, "{ personCount }");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].error().extensions(),
            &graphql_value!({ "code": "INTERNAL_SERVER_ERROR" })
        );
    }
}
